//! The SELECT statement builder.

use crate::ast::conditions::ConditionList;
use crate::ast::{Expr, Value};
use crate::command::Command;
use crate::dialect::precompiler::{AND, OR};
use crate::dialect::Dialect;
use crate::dialect::OperatorGroup;
use crate::error::{Error, Result};
use crate::transpiler;
use serde::{Deserialize, Serialize};

/// One JOIN clause: the rendered join text plus its ON or USING constraints.
/// At most one of the two is emitted; ON takes precedence when both were
/// supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct JoinClause {
    pub(crate) text: String,
    pub(crate) on: Vec<String>,
    pub(crate) using: Vec<String>,
}

/// Accumulates one dialect-neutral SELECT statement.
///
/// Each builder owns exactly one in-progress statement and is not meant to
/// be shared across threads. Every token is rendered through the dialect's
/// precompiler as it is inserted, so `statement` is pure composition over
/// stored fragments and cannot fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectBuilder {
    pub(crate) dialect: Dialect,
    pub(crate) distinct: bool,
    pub(crate) columns: Vec<String>,
    pub(crate) wildcard: String,
    pub(crate) from: Option<String>,
    pub(crate) joins: Vec<JoinClause>,
    pub(crate) where_list: ConditionList,
    pub(crate) group_by: Vec<String>,
    pub(crate) having_list: ConditionList,
    pub(crate) order_by: Vec<String>,
    pub(crate) limit: u64,
    pub(crate) offset: u64,
    pub(crate) combine: Vec<String>,
}

impl SelectBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            distinct: false,
            columns: Vec::new(),
            wildcard: "*".to_string(),
            from: None,
            joins: Vec::new(),
            where_list: ConditionList::default(),
            group_by: Vec::new(),
            having_list: ConditionList::default(),
            order_by: Vec::new(),
            limit: 0,
            offset: 0,
            combine: Vec::new(),
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Clear all accumulated clauses, keeping the dialect.
    pub fn reset(self) -> Self {
        Self::new(self.dialect)
    }

    pub fn distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    /// Set the column list used when no explicit columns were added.
    pub fn all(mut self, wildcard: impl Into<Expr>) -> Result<Self> {
        self.wildcard = self.dialect.precompiler().prepare_identifier(&wildcard.into())?;
        Ok(self)
    }

    pub fn column(mut self, column: impl Into<Expr>) -> Result<Self> {
        let rendered = self.dialect.precompiler().prepare_identifier(&column.into())?;
        self.columns.push(rendered);
        Ok(self)
    }

    pub fn column_as(mut self, column: impl Into<Expr>, alias: &str) -> Result<Self> {
        let pre = self.dialect.precompiler();
        let column = pre.prepare_identifier(&column.into())?;
        let alias = pre.prepare_alias(alias)?;
        self.columns.push(format!("{column} AS {alias}"));
        Ok(self)
    }

    pub fn from(mut self, table: impl Into<Expr>) -> Result<Self> {
        let rendered = self.dialect.precompiler().prepare_identifier(&table.into())?;
        self.from = Some(rendered);
        Ok(self)
    }

    pub fn from_as(mut self, table: impl Into<Expr>, alias: &str) -> Result<Self> {
        let pre = self.dialect.precompiler();
        let table = pre.prepare_identifier(&table.into())?;
        let alias = pre.prepare_alias(alias)?;
        self.from = Some(format!("{table} {alias}"));
        Ok(self)
    }

    /// Add a join of the given type. Constraints attach through `on` or
    /// `using` afterwards.
    pub fn join(mut self, kind: &str, table: impl Into<Expr>) -> Result<Self> {
        let pre = self.dialect.precompiler();
        let kind = pre.prepare_join(kind)?;
        let table = pre.prepare_identifier(&table.into())?;
        self.joins.push(JoinClause {
            text: format!("{kind} JOIN {table}"),
            ..JoinClause::default()
        });
        Ok(self)
    }

    pub fn join_as(mut self, kind: &str, table: impl Into<Expr>, alias: &str) -> Result<Self> {
        let pre = self.dialect.precompiler();
        let kind = pre.prepare_join(kind)?;
        let table = pre.prepare_identifier(&table.into())?;
        let alias = pre.prepare_alias(alias)?;
        self.joins.push(JoinClause {
            text: format!("{kind} JOIN {table} {alias}"),
            ..JoinClause::default()
        });
        Ok(self)
    }

    /// Attach an ON predicate to the most recent join.
    pub fn on(mut self, left: impl Into<Expr>, op: &str, right: impl Into<Expr>) -> Result<Self> {
        let pre = self.dialect.precompiler();
        let left = pre.prepare_identifier(&left.into())?;
        let op = pre.prepare_operator(OperatorGroup::Comparison, op)?;
        let right = pre.prepare_identifier(&right.into())?;
        let join = self
            .joins
            .last_mut()
            .ok_or_else(|| Error::argument("on() requires a preceding join"))?;
        join.on.push(format!("{left} {op} {right}"));
        Ok(self)
    }

    /// Attach a USING column to the most recent join.
    pub fn using(mut self, column: impl Into<Expr>) -> Result<Self> {
        let rendered = self.dialect.precompiler().prepare_identifier(&column.into())?;
        let join = self
            .joins
            .last_mut()
            .ok_or_else(|| Error::argument("using() requires a preceding join"))?;
        join.using.push(rendered);
        Ok(self)
    }

    /// Add an AND-connected predicate. The operator is validated against the
    /// dialect's comparison set at this point, not at render time.
    pub fn filter(mut self, column: impl Into<Expr>, op: &str, value: impl Into<Value>) -> Result<Self> {
        self.where_list
            .push_predicate(self.dialect.precompiler(), &column.into(), op, &value.into(), AND)?;
        Ok(self)
    }

    /// Add an OR-connected predicate.
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

    /// Open or close an AND-connected predicate group (`"("` / `")"`).
    pub fn filter_block(mut self, paren: &str) -> Result<Self> {
        self.where_list.push_block(self.dialect.precompiler(), paren, AND)?;
        Ok(self)
    }

    /// Open or close an OR-connected predicate group.
    pub fn or_filter_block(mut self, paren: &str) -> Result<Self> {
        self.where_list.push_block(self.dialect.precompiler(), paren, OR)?;
        Ok(self)
    }

    pub fn group_by(mut self, column: impl Into<Expr>) -> Result<Self> {
        let rendered = self.dialect.precompiler().prepare_identifier(&column.into())?;
        self.group_by.push(rendered);
        Ok(self)
    }

    pub fn having(mut self, column: impl Into<Expr>, op: &str, value: impl Into<Value>) -> Result<Self> {
        self.having_list
            .push_predicate(self.dialect.precompiler(), &column.into(), op, &value.into(), AND)?;
        Ok(self)
    }

    pub fn or_having(
        mut self,
        column: impl Into<Expr>,
        op: &str,
        value: impl Into<Value>,
    ) -> Result<Self> {
        self.having_list
            .push_predicate(self.dialect.precompiler(), &column.into(), op, &value.into(), OR)?;
        Ok(self)
    }

    pub fn having_block(mut self, paren: &str) -> Result<Self> {
        self.having_list.push_block(self.dialect.precompiler(), paren, AND)?;
        Ok(self)
    }

    pub fn or_having_block(mut self, paren: &str) -> Result<Self> {
        self.having_list.push_block(self.dialect.precompiler(), paren, OR)?;
        Ok(self)
    }

    /// Add a sort expression; direction is `ASC` or `DESC`.
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

    /// Cap the number of rows returned; 0 means unbounded.
    pub fn limit(mut self, limit: i64) -> Result<Self> {
        self.limit = self.dialect.precompiler().prepare_natural(limit)?;
        Ok(self)
    }

    /// Skip the first `offset` rows of the ordered result.
    pub fn offset(mut self, offset: i64) -> Result<Self> {
        self.offset = self.dialect.precompiler().prepare_natural(offset)?;
        Ok(self)
    }

    /// Append another statement through a set operator (`UNION`,
    /// `INTERSECT`, ...). The other statement's terminator is stripped and
    /// the result rendered as `OPERATOR (subquery)`.
    pub fn combine(mut self, operator: &str, other: &impl Combinable) -> Result<Self> {
        let op = self
            .dialect
            .precompiler()
            .prepare_operator(OperatorGroup::Set, operator)?;
        self.combine.push(format!("{op} ({})", other.subselect_text()));
        Ok(self)
    }

    /// Whether every opened filter/having group has been closed. Unbalanced
    /// statements still render, best effort.
    pub fn balanced(&self) -> bool {
        self.where_list.balanced() && self.having_list.balanced()
    }

    /// Render the accumulated statement for this builder's dialect.
    /// Idempotent: repeated calls yield byte-identical text.
    pub fn statement(&self, terminated: bool) -> Command {
        transpiler::select::assemble(self, terminated)
    }
}

/// Statements that can appear on the right-hand side of a set operator.
pub trait Combinable {
    /// The statement text, with any trailing terminator stripped.
    fn subselect_text(&self) -> String;
}

impl Combinable for SelectBuilder {
    fn subselect_text(&self) -> String {
        self.statement(false).text().to_string()
    }
}

impl Combinable for Command {
    fn subselect_text(&self) -> String {
        Command::trim(self.text()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_invalid_operator_fails_at_insertion() {
        let err = SelectBuilder::new(Dialect::PostgreSql)
            .from("users")
            .unwrap()
            .filter("name", "SOUNDS LIKE", "bob");
        assert!(matches!(err, Err(Error::InvalidOperator(_))));
    }

    #[test]
    fn test_negative_limit_is_rejected() {
        let err = SelectBuilder::new(Dialect::PostgreSql).limit(-5);
        assert!(matches!(err, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_on_requires_a_join() {
        let err = SelectBuilder::new(Dialect::PostgreSql).on("a.id", "=", "b.id");
        assert!(matches!(err, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_on_takes_precedence_over_using() {
        let cmd = SelectBuilder::new(Dialect::PostgreSql)
            .from("orders")
            .unwrap()
            .join("LEFT", "users")
            .unwrap()
            .using("user_id")
            .unwrap()
            .on("orders.user_id", "=", "users.id")
            .unwrap()
            .statement(false);
        assert_eq!(
            cmd.text(),
            "SELECT * FROM \"orders\" LEFT JOIN \"users\" ON (\"orders\".\"user_id\" = \"users\".\"id\")"
        );
    }

    #[test]
    fn test_unclosed_group_renders_and_reports() {
        let builder = SelectBuilder::new(Dialect::PostgreSql)
            .from("users")
            .unwrap()
            .filter_block("(")
            .unwrap()
            .filter("a", "=", 1)
            .unwrap();
        assert!(!builder.balanced());
        assert_eq!(
            builder.statement(false).text(),
            "SELECT * FROM \"users\" WHERE (\"a\" = 1"
        );
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let builder = SelectBuilder::new(Dialect::MySql)
            .column("id")
            .unwrap()
            .from("users")
            .unwrap()
            .filter("active", "=", true)
            .unwrap();
        assert_eq!(builder.statement(true), builder.statement(true));
    }

    #[test]
    fn test_reset_keeps_the_dialect() {
        let builder = SelectBuilder::new(Dialect::Oracle)
            .from("users")
            .unwrap()
            .reset();
        assert_eq!(builder.dialect(), Dialect::Oracle);
        assert_eq!(builder.statement(false).text(), "SELECT *");
    }
}
