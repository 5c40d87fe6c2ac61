use super::precompiler::{hex_upper, Precompiler};

/// PostgreSQL comparison operators: ANSI plus case-insensitive matching,
/// SIMILAR TO, and POSIX regular expressions.
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
    "ILIKE",
    "NOT ILIKE",
    "SIMILAR TO",
    "NOT SIMILAR TO",
    "IN",
    "NOT IN",
    "IS",
    "IS NOT",
    "~",
    "~*",
    "!~",
    "!~*",
];

pub struct PostgreSqlPrecompiler;

impl Precompiler for PostgreSqlPrecompiler {
    fn quotes(&self) -> (char, char) {
        ('"', '"')
    }

    fn prepare_boolean(&self, value: bool) -> String {
        if value { "TRUE" } else { "FALSE" }.to_string()
    }

    fn comparison_operators(&self) -> &'static [&'static str] {
        COMPARISON
    }

    fn prepare_bytes(&self, bytes: &[u8]) -> String {
        format!("'\\x{}'", hex_upper(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Value;
    use crate::dialect::OperatorGroup;

    #[test]
    fn test_boolean_literals() {
        let pre = PostgreSqlPrecompiler;
        assert_eq!(pre.prepare_value(&Value::Bool(true)).unwrap(), "TRUE");
        assert_eq!(pre.prepare_value(&Value::Bool(false)).unwrap(), "FALSE");
    }

    #[test]
    fn test_ilike_accepted() {
        let pre = PostgreSqlPrecompiler;
        assert_eq!(
            pre.prepare_operator(OperatorGroup::Comparison, "ilike").unwrap(),
            "ILIKE"
        );
    }

    #[test]
    fn test_bytea_hex_form() {
        let pre = PostgreSqlPrecompiler;
        assert_eq!(pre.prepare_bytes(&[0xde, 0xad]), "'\\xDEAD'");
    }
}
