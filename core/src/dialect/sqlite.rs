use super::precompiler::{OperatorGroup, Precompiler};

/// SQLite comparison operators: ANSI plus GLOB, MATCH, and REGEXP.
const COMPARISON: &[&str] = &[
    "=",
    "<>",
    "<",
    "<=",
    ">",
    ">=",
    "BETWEEN",
    "NOT BETWEEN",
    "LIKE",
    "NOT LIKE",
    "IN",
    "NOT IN",
    "IS",
    "IS NOT",
    "GLOB",
    "NOT GLOB",
    "MATCH",
    "NOT MATCH",
    "REGEXP",
    "NOT REGEXP",
];

/// SQLite has no RIGHT or FULL joins.
const JOIN: &[&str] = &[
    "CROSS",
    "INNER",
    "LEFT",
    "LEFT OUTER",
    "NATURAL",
    "NATURAL CROSS",
    "NATURAL INNER",
    "NATURAL LEFT",
    "NATURAL LEFT OUTER",
];

pub struct SqlitePrecompiler;

impl Precompiler for SqlitePrecompiler {
    fn quotes(&self) -> (char, char) {
        ('"', '"')
    }

    /// SQLite has no boolean type; integers stand in.
    fn prepare_boolean(&self, value: bool) -> String {
        if value { "1" } else { "0" }.to_string()
    }

    fn comparison_operators(&self) -> &'static [&'static str] {
        COMPARISON
    }

    fn join_types(&self) -> &'static [&'static str] {
        JOIN
    }

    fn remap_operator(&self, group: OperatorGroup, token: &str) -> String {
        match (group, token) {
            (OperatorGroup::Comparison, "!=") => "<>".to_string(),
            (OperatorGroup::Comparison, "REGEX") => "REGEXP".to_string(),
            (OperatorGroup::Comparison, "NOT REGEX") => "NOT REGEXP".to_string(),
            _ => token.to_string(),
        }
    }
}
