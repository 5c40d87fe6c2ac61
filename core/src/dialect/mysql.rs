use super::precompiler::{hex_upper, strip_control_chars, OperatorGroup, Precompiler};

/// MySQL comparison operators: the ANSI core plus the null-safe equality
/// operator and regular-expression matching.
const COMPARISON: &[&str] = &[
    "=",
    "<>",
    "<",
    "<=",
    ">",
    ">=",
    "<=>",
    "BETWEEN",
    "NOT BETWEEN",
    "LIKE",
    "NOT LIKE",
    "IN",
    "NOT IN",
    "IS",
    "IS NOT",
    "REGEXP",
    "NOT REGEXP",
];

/// MySQL set operators; `INTERSECT`/`EXCEPT` are not part of the family's
/// grammar and are rejected at insertion time.
const SET: &[&str] = &["UNION", "UNION ALL", "UNION DISTINCT"];

const JOIN: &[&str] = &[
    "CROSS",
    "INNER",
    "LEFT",
    "LEFT OUTER",
    "RIGHT",
    "RIGHT OUTER",
    "NATURAL",
    "NATURAL LEFT",
    "NATURAL LEFT OUTER",
    "NATURAL RIGHT",
    "NATURAL RIGHT OUTER",
];

pub struct MySqlPrecompiler;

impl Precompiler for MySqlPrecompiler {
    fn quotes(&self) -> (char, char) {
        ('`', '`')
    }

    fn prepare_boolean(&self, value: bool) -> String {
        if value { "TRUE" } else { "FALSE" }.to_string()
    }

    fn comparison_operators(&self) -> &'static [&'static str] {
        COMPARISON
    }

    fn set_operators(&self) -> &'static [&'static str] {
        SET
    }

    fn join_types(&self) -> &'static [&'static str] {
        JOIN
    }

    fn remap_operator(&self, group: OperatorGroup, token: &str) -> String {
        match (group, token) {
            (OperatorGroup::Comparison, "!=") => "<>".to_string(),
            (OperatorGroup::Comparison, "REGEX") => "REGEXP".to_string(),
            (OperatorGroup::Comparison, "NOT REGEX") => "NOT REGEXP".to_string(),
            (OperatorGroup::Comparison, "RLIKE") => "REGEXP".to_string(),
            _ => token.to_string(),
        }
    }

    /// Backslash is an escape character in MySQL string literals, so it is
    /// doubled along with embedded quotes.
    fn quote_string(&self, value: &str) -> String {
        let cleaned = strip_control_chars(value);
        format!("'{}'", cleaned.replace('\\', "\\\\").replace('\'', "''"))
    }

    fn prepare_bytes(&self, bytes: &[u8]) -> String {
        format!("0x{}", hex_upper(bytes))
    }
}
