//! The DELETE statement builder.

use crate::ast::conditions::ConditionList;
use crate::ast::{Expr, Value};
use crate::command::Command;
use crate::dialect::precompiler::{AND, OR};
use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::transpiler;
use serde::{Deserialize, Serialize};

/// Accumulates one DELETE statement. ORDER BY and LIMIT render only for the
/// MySQL family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteBuilder {
    pub(crate) dialect: Dialect,
    pub(crate) from: Option<String>,
    pub(crate) where_list: ConditionList,
    pub(crate) order_by: Vec<String>,
    pub(crate) limit: u64,
}

impl DeleteBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            from: None,
            where_list: ConditionList::default(),
            order_by: Vec::new(),
            limit: 0,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn reset(self) -> Self {
        Self::new(self.dialect)
    }

    pub fn from(mut self, table: impl Into<Expr>) -> Result<Self> {
        let rendered = self.dialect.precompiler().prepare_identifier(&table.into())?;
        self.from = Some(rendered);
        Ok(self)
    }

    pub fn filter(mut self, column: impl Into<Expr>, op: &str, value: impl Into<Value>) -> Result<Self> {
        self.where_list
            .push_predicate(self.dialect.precompiler(), &column.into(), op, &value.into(), AND)?;
        Ok(self)
    }

    pub fn or_filter(
        mut self,
        column: impl Into<Expr>,
        op: &str,
        value: impl Into<Value>,
    ) -> Result<Self> {
        self.where_list
            .push_predicate(self.dialect.precompiler(), &column.into(), op, &value.into(), OR)?;
        Ok(self)
    }

    pub fn filter_block(mut self, paren: &str) -> Result<Self> {
        self.where_list.push_block(self.dialect.precompiler(), paren, AND)?;
        Ok(self)
    }

    pub fn or_filter_block(mut self, paren: &str) -> Result<Self> {
        self.where_list.push_block(self.dialect.precompiler(), paren, OR)?;
        Ok(self)
    }

    pub fn order_by(mut self, column: impl Into<Expr>, direction: &str) -> Result<Self> {
        let rendered = self.dialect.precompiler().prepare_identifier(&column.into())?;
        let direction = match direction.trim().to_uppercase().as_str() {
            "ASC" => "ASC",
            "DESC" => "DESC",
            other => {
                return Err(Error::argument(format!("invalid sort direction '{other}'")));
            }
        };
        self.order_by.push(format!("{rendered} {direction}"));
        Ok(self)
    }

    pub fn limit(mut self, limit: i64) -> Result<Self> {
        self.limit = self.dialect.precompiler().prepare_natural(limit)?;
        Ok(self)
    }

    pub fn balanced(&self) -> bool {
        self.where_list.balanced()
    }

    pub fn statement(&self, terminated: bool) -> Command {
        transpiler::dml::assemble_delete(self, terminated)
    }
}
