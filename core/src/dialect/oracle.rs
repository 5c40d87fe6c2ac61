use super::precompiler::{hex_upper, OperatorGroup, Precompiler};

/// Oracle spells the set-difference operator MINUS.
const SET: &[&str] = &["UNION", "UNION ALL", "INTERSECT", "MINUS"];

pub struct OraclePrecompiler;

impl Precompiler for OraclePrecompiler {
    fn quotes(&self) -> (char, char) {
        ('"', '"')
    }

    fn prepare_boolean(&self, value: bool) -> String {
        if value { "1" } else { "0" }.to_string()
    }

    fn set_operators(&self) -> &'static [&'static str] {
        SET
    }

    fn remap_operator(&self, group: OperatorGroup, token: &str) -> String {
        match (group, token) {
            (OperatorGroup::Comparison, "!=") => "<>".to_string(),
            (OperatorGroup::Set, "EXCEPT") => "MINUS".to_string(),
            _ => token.to_string(),
        }
    }

    fn prepare_bytes(&self, bytes: &[u8]) -> String {
        format!("HEXTORAW('{}')", hex_upper(bytes))
    }
}
