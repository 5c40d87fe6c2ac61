//! Predicate accumulation shared by the WHERE-bearing builders.

use crate::ast::{Expr, Value};
use crate::dialect::precompiler::{CLOSING_PARENTHESIS, OPENING_PARENTHESIS};
use crate::dialect::{OperatorGroup, Precompiler};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// An ordered stream of `(connector, token)` pairs, where the token is a
/// rendered predicate or a parenthesis marker. Tokens are precompiled as
/// they are pushed; rendering never revisits raw input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub(crate) struct ConditionList {
    pub(crate) entries: Vec<(String, String)>,
    depth: u32,
}

impl ConditionList {
    pub(crate) fn push_predicate(
        &mut self,
        pre: &dyn Precompiler,
        column: &Expr,
        op: &str,
        value: &Value,
        connector: &str,
    ) -> Result<()> {
        let connector = pre.prepare_connector(connector)?;
        let predicate = render_predicate(pre, column, op, value)?;
        self.entries.push((connector, predicate));
        Ok(())
    }

    /// Push an opening or closing parenthesis marker. A closing marker with
    /// no open group is rejected eagerly; unclosed groups are permitted and
    /// observable through `balanced`.
    pub(crate) fn push_block(
        &mut self,
        pre: &dyn Precompiler,
        paren: &str,
        connector: &str,
    ) -> Result<()> {
        let connector = pre.prepare_connector(connector)?;
        let paren = pre.prepare_parenthesis(paren)?;
        if paren == CLOSING_PARENTHESIS {
            self.depth = self
                .depth
                .checked_sub(1)
                .ok_or_else(|| Error::argument("closing parenthesis without an open group"))?;
        } else {
            debug_assert_eq!(paren, OPENING_PARENTHESIS);
            self.depth += 1;
        }
        self.entries.push((connector, paren));
        Ok(())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn balanced(&self) -> bool {
        self.depth == 0
    }
}

/// Render one predicate: identifier, validated operator, and value, with
/// the operator-specific shapes spelled out.
pub(crate) fn render_predicate(
    pre: &dyn Precompiler,
    column: &Expr,
    op: &str,
    value: &Value,
) -> Result<String> {
    let column = pre.prepare_identifier(column)?;
    let op = pre.prepare_operator(OperatorGroup::Comparison, op)?;
    match op.as_str() {
        "BETWEEN" | "NOT BETWEEN" => match value {
            Value::Array(bounds) if bounds.len() == 2 => {
                let lower = pre.prepare_value(&bounds[0])?;
                let upper = pre.prepare_value(&bounds[1])?;
                Ok(format!("{column} {op} {lower} AND {upper}"))
            }
            _ => Err(Error::argument(format!(
                "{op} comparisons require a two-element sequence"
            ))),
        },
        "IN" | "NOT IN" => match value {
            Value::Array(_) | Value::Subquery(_) | Value::Raw(_) => {
                Ok(format!("{column} {op} {}", pre.prepare_value(value)?))
            }
            _ => Err(Error::argument(format!(
                "{op} comparisons require a sequence or subquery"
            ))),
        },
        "IS" | "IS NOT" => match value {
            Value::Null => Ok(format!("{column} {op} NULL")),
            _ => Err(Error::argument(format!("{op} comparisons require NULL"))),
        },
        _ => Ok(format!("{column} {op} {}", pre.prepare_value(value)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;
    use pretty_assertions::assert_eq;

    fn pre() -> &'static dyn Precompiler {
        Dialect::MySql.precompiler()
    }

    #[test]
    fn test_between_takes_two_bounds() {
        let sql = render_predicate(
            pre(),
            &Expr::Name("age".into()),
            "between",
            &Value::from(vec![18, 65]),
        )
        .unwrap();
        assert_eq!(sql, "`age` BETWEEN 18 AND 65");

        let err = render_predicate(
            pre(),
            &Expr::Name("age".into()),
            "between",
            &Value::from(18),
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_in_requires_a_sequence() {
        let sql = render_predicate(
            pre(),
            &Expr::Name("id".into()),
            "IN",
            &Value::from(vec![1, 2]),
        )
        .unwrap();
        assert_eq!(sql, "`id` IN (1, 2)");

        assert!(render_predicate(pre(), &Expr::Name("id".into()), "IN", &Value::from(1)).is_err());
    }

    #[test]
    fn test_is_requires_null() {
        let sql =
            render_predicate(pre(), &Expr::Name("deleted_at".into()), "IS", &Value::Null).unwrap();
        assert_eq!(sql, "`deleted_at` IS NULL");

        assert!(
            render_predicate(pre(), &Expr::Name("deleted_at".into()), "IS", &Value::from(1))
                .is_err()
        );
    }

    #[test]
    fn test_unmatched_closing_block_is_rejected() {
        let mut list = ConditionList::default();
        let err = list.push_block(pre(), ")", "AND");
        assert!(matches!(err, Err(Error::InvalidArgument(_))));

        list.push_block(pre(), "(", "AND").unwrap();
        assert!(!list.balanced());
        list.push_block(pre(), ")", "AND").unwrap();
        assert!(list.balanced());
    }
}
