use super::precompiler::Precompiler;

/// Firebird supports only the union family of set operators.
const SET: &[&str] = &["UNION", "UNION ALL"];

const JOIN: &[&str] = &[
    "CROSS",
    "INNER",
    "LEFT",
    "LEFT OUTER",
    "RIGHT",
    "RIGHT OUTER",
    "FULL",
    "FULL OUTER",
];

pub struct FirebirdPrecompiler;

impl Precompiler for FirebirdPrecompiler {
    fn quotes(&self) -> (char, char) {
        ('"', '"')
    }

    fn prepare_boolean(&self, value: bool) -> String {
        if value { "1" } else { "0" }.to_string()
    }

    fn set_operators(&self) -> &'static [&'static str] {
        SET
    }

    fn join_types(&self) -> &'static [&'static str] {
        JOIN
    }
}
