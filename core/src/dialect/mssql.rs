use super::precompiler::{hex_upper, Precompiler};

pub struct MsSqlPrecompiler;

impl Precompiler for MsSqlPrecompiler {
    fn quotes(&self) -> (char, char) {
        ('[', ']')
    }

    /// BIT literals; there is no boolean keyword in Transact-SQL.
    fn prepare_boolean(&self, value: bool) -> String {
        if value { "1" } else { "0" }.to_string()
    }

    fn prepare_bytes(&self, bytes: &[u8]) -> String {
        format!("0x{}", hex_upper(bytes))
    }
}
