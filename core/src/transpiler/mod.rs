//! Dialect statement assembly.
//!
//! Everything here composes fragments the precompiler already rendered; no
//! raw user input reaches this module.

pub(crate) mod dml;
pub(crate) mod select;

use crate::ast::JoinClause;
use crate::dialect::precompiler::{CLOSING_PARENTHESIS, OPENING_PARENTHESIS};

/// Append WHERE/HAVING entries.
///
/// The connector is emitted only when the previously emitted token was not
/// an opening parenthesis and the current token is not a closing one, which
/// reproduces nested boolean grouping without extraneous connectors.
pub(crate) fn append_conditions(sql: &mut String, entries: &[(String, String)]) {
    let mut append = false;
    for (connector, token) in entries {
        if append && token != CLOSING_PARENTHESIS {
            sql.push(' ');
            sql.push_str(connector);
            sql.push(' ');
        }
        sql.push_str(token);
        append = token != OPENING_PARENTHESIS;
    }
}

/// Append join clauses with their ON or USING constraints. ON wins when
/// both were supplied.
pub(crate) fn append_joins(sql: &mut String, joins: &[JoinClause]) {
    for join in joins {
        sql.push(' ');
        sql.push_str(&join.text);
        if !join.on.is_empty() {
            sql.push_str(" ON (");
            sql.push_str(&join.on.join(" AND "));
            sql.push(')');
        } else if !join.using.is_empty() {
            sql.push_str(" USING (");
            sql.push_str(&join.using.join(", "));
            sql.push(')');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(connector: &str, token: &str) -> (String, String) {
        (connector.to_string(), token.to_string())
    }

    #[test]
    fn test_connector_suppression_around_parentheses() {
        let mut sql = String::new();
        append_conditions(
            &mut sql,
            &[
                entry("AND", "("),
                entry("AND", "a = 1"),
                entry("OR", "b = 2"),
                entry("AND", ")"),
                entry("AND", "c = 3"),
            ],
        );
        assert_eq!(sql, "(a = 1 OR b = 2) AND c = 3");
    }

    #[test]
    fn test_no_leading_connector() {
        let mut sql = String::new();
        append_conditions(&mut sql, &[entry("OR", "a = 1"), entry("OR", "b = 2")]);
        assert_eq!(sql, "a = 1 OR b = 2");
    }

    #[test]
    fn test_nested_groups() {
        let mut sql = String::new();
        append_conditions(
            &mut sql,
            &[
                entry("AND", "a = 1"),
                entry("AND", "("),
                entry("AND", "b = 2"),
                entry("OR", "("),
                entry("AND", "c = 3"),
                entry("AND", "d = 4"),
                entry("AND", ")"),
                entry("AND", ")"),
            ],
        );
        assert_eq!(sql, "a = 1 AND (b = 2 OR (c = 3 AND d = 4))");
    }
}
