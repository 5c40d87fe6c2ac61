//! The UPDATE statement builder.

use crate::ast::conditions::ConditionList;
use crate::ast::{Expr, Value};
use crate::command::Command;
use crate::dialect::precompiler::{AND, OR};
use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::transpiler;
use serde::{Deserialize, Serialize};

/// Accumulates one UPDATE statement.
///
/// ORDER BY and LIMIT are grammar extensions of the MySQL family; other
/// dialects ignore them at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateBuilder {
    pub(crate) dialect: Dialect,
    pub(crate) table: Option<String>,
    pub(crate) set_clauses: Vec<String>,
    pub(crate) where_list: ConditionList,
    pub(crate) order_by: Vec<String>,
    pub(crate) limit: u64,
}

impl UpdateBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            table: None,
            set_clauses: Vec::new(),
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

    pub fn table(mut self, table: impl Into<Expr>) -> Result<Self> {
        let rendered = self.dialect.precompiler().prepare_identifier(&table.into())?;
        self.table = Some(rendered);
        Ok(self)
    }

    /// Add one assignment to the SET clause.
    pub fn set(mut self, column: impl Into<Expr>, value: impl Into<Value>) -> Result<Self> {
        let pre = self.dialect.precompiler();
        let column = pre.prepare_identifier(&column.into())?;
        let value = pre.prepare_value(&value.into())?;
        self.set_clauses.push(format!("{column} = {value}"));
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
        transpiler::dml::assemble_update(self, terminated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mysql_renders_order_and_limit() {
        let cmd = UpdateBuilder::new(Dialect::MySql)
            .table("users")
            .unwrap()
            .set("active", false)
            .unwrap()
            .filter("last_seen", "<", "2020-01-01")
            .unwrap()
            .order_by("id", "ASC")
            .unwrap()
            .limit(100)
            .unwrap()
            .statement(true);
        assert_eq!(
            cmd.text(),
            "UPDATE `users` SET `active` = FALSE WHERE `last_seen` < '2020-01-01' ORDER BY `id` ASC LIMIT 100;"
        );
    }

    #[test]
    fn test_postgres_ignores_order_and_limit() {
        let cmd = UpdateBuilder::new(Dialect::PostgreSql)
            .table("users")
            .unwrap()
            .set("active", false)
            .unwrap()
            .order_by("id", "ASC")
            .unwrap()
            .limit(100)
            .unwrap()
            .statement(true);
        assert_eq!(cmd.text(), "UPDATE \"users\" SET \"active\" = FALSE;");
    }
}
