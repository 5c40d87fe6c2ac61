//! The INSERT statement builder.

use crate::ast::{Expr, Value};
use crate::command::Command;
use crate::dialect::Dialect;
use crate::error::Result;
use crate::transpiler;
use serde::{Deserialize, Serialize};

/// Accumulates one single-row INSERT statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertBuilder {
    pub(crate) dialect: Dialect,
    pub(crate) into: Option<String>,
    pub(crate) columns: Vec<String>,
    pub(crate) values: Vec<String>,
}

impl InsertBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            into: None,
            columns: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn reset(self) -> Self {
        Self::new(self.dialect)
    }

    pub fn into(mut self, table: impl Into<Expr>) -> Result<Self> {
        let rendered = self.dialect.precompiler().prepare_identifier(&table.into())?;
        self.into = Some(rendered);
        Ok(self)
    }

    /// Add one column/value pair to the row being inserted.
    pub fn column(mut self, column: impl Into<Expr>, value: impl Into<Value>) -> Result<Self> {
        let pre = self.dialect.precompiler();
        self.columns.push(pre.prepare_identifier(&column.into())?);
        self.values.push(pre.prepare_value(&value.into())?);
        Ok(self)
    }

    pub fn statement(&self, terminated: bool) -> Command {
        transpiler::dml::assemble_insert(self, terminated)
    }
}
