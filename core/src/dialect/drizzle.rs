use super::mysql::MySqlPrecompiler;
use super::precompiler::{OperatorGroup, Precompiler};

/// Drizzle is a MySQL fork; its token grammar tracks the family's.
pub struct DrizzlePrecompiler;

impl Precompiler for DrizzlePrecompiler {
    fn quotes(&self) -> (char, char) {
        ('`', '`')
    }

    fn prepare_boolean(&self, value: bool) -> String {
        MySqlPrecompiler.prepare_boolean(value)
    }

    fn comparison_operators(&self) -> &'static [&'static str] {
        MySqlPrecompiler.comparison_operators()
    }

    fn set_operators(&self) -> &'static [&'static str] {
        MySqlPrecompiler.set_operators()
    }

    fn join_types(&self) -> &'static [&'static str] {
        MySqlPrecompiler.join_types()
    }

    fn remap_operator(&self, group: OperatorGroup, token: &str) -> String {
        MySqlPrecompiler.remap_operator(group, token)
    }

    fn quote_string(&self, value: &str) -> String {
        MySqlPrecompiler.quote_string(value)
    }

    fn prepare_bytes(&self, bytes: &[u8]) -> String {
        MySqlPrecompiler.prepare_bytes(bytes)
    }
}
