//! The per-dialect token precompiler contract.
//!
//! Every raw value, identifier, or keyword becomes dialect-safe SQL text
//! here, at the moment it enters the statement model. The assemblers never
//! touch raw user input.

use crate::ast::{Expr, Value};
use crate::command::Command;
use crate::error::{Error, Result};

/// Connector tokens joining predicates.
pub const AND: &str = "AND";
pub const OR: &str = "OR";

/// Parenthesis markers stored in the where/having clause streams.
pub const OPENING_PARENTHESIS: &str = "(";
pub const CLOSING_PARENTHESIS: &str = ")";

/// Operator grouping for [`Precompiler::prepare_operator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorGroup {
    Comparison,
    Set,
}

/// Comparison operators every dialect accepts.
pub(crate) const ANSI_COMPARISON: &[&str] = &[
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
];

/// Set operators in the ANSI core.
pub(crate) const ANSI_SET: &[&str] = &["UNION", "UNION ALL", "INTERSECT", "EXCEPT"];

/// Join types in the ANSI core.
pub(crate) const ANSI_JOIN: &[&str] = &[
    "CROSS",
    "INNER",
    "LEFT",
    "LEFT OUTER",
    "RIGHT",
    "RIGHT OUTER",
    "FULL",
    "FULL OUTER",
    "NATURAL",
    "NATURAL CROSS",
    "NATURAL INNER",
    "NATURAL LEFT",
    "NATURAL LEFT OUTER",
];

/// Collapse whitespace and uppercase a keyword token.
pub(crate) fn normalize_token(token: &str) -> String {
    token
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Strip null bytes and control characters a literal must never carry.
/// Tabs and line breaks survive.
pub(crate) fn strip_control_chars(value: &str) -> String {
    value
        .chars()
        .filter(|c| {
            !matches!(c, '\u{00}'..='\u{08}' | '\u{0b}' | '\u{0c}' | '\u{0e}'..='\u{1f}' | '\u{7f}')
        })
        .collect()
}

pub(crate) fn hex_upper(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02X}")).collect()
}

/// Turns raw semantic tokens into safe, rendered SQL text for one dialect.
///
/// The default methods implement the ANSI behavior; dialects override the
/// quote characters, boolean literals, operator sets, and remaps.
pub trait Precompiler: Sync {
    /// Identifier quote characters, opening and closing.
    fn quotes(&self) -> (char, char);

    /// Canonical boolean literal.
    fn prepare_boolean(&self, value: bool) -> String;

    /// Comparison operators this dialect accepts, post-remap.
    fn comparison_operators(&self) -> &'static [&'static str] {
        ANSI_COMPARISON
    }

    /// Set operators this dialect accepts, post-remap.
    fn set_operators(&self) -> &'static [&'static str] {
        ANSI_SET
    }

    /// Join types this dialect accepts.
    fn join_types(&self) -> &'static [&'static str] {
        ANSI_JOIN
    }

    /// Remap a recognized spelling to the dialect's canonical one, before
    /// validation. `!=` normalizes to `<>` everywhere.
    fn remap_operator(&self, group: OperatorGroup, token: &str) -> String {
        if group == OperatorGroup::Comparison && token == "!=" {
            return "<>".to_string();
        }
        token.to_string()
    }

    /// Validate an operator token against the dialect's enumerated set.
    fn prepare_operator(&self, group: OperatorGroup, token: &str) -> Result<String> {
        let normalized = normalize_token(token);
        let canonical = self.remap_operator(group, &normalized);
        let set = match group {
            OperatorGroup::Comparison => self.comparison_operators(),
            OperatorGroup::Set => self.set_operators(),
        };
        if set.contains(&canonical.as_str()) {
            Ok(canonical)
        } else {
            Err(Error::operator(token))
        }
    }

    /// Validate a connector token (`AND` / `OR`).
    fn prepare_connector(&self, token: &str) -> Result<String> {
        let normalized = normalize_token(token);
        match normalized.as_str() {
            AND | OR => Ok(normalized),
            _ => Err(Error::operator(token)),
        }
    }

    /// Validate a parenthesis marker.
    fn prepare_parenthesis(&self, token: &str) -> Result<String> {
        match token.trim() {
            OPENING_PARENTHESIS | CLOSING_PARENTHESIS => Ok(token.trim().to_string()),
            _ => Err(Error::operator(token)),
        }
    }

    /// Validate a join-type token.
    fn prepare_join(&self, token: &str) -> Result<String> {
        let normalized = normalize_token(token);
        if self.join_types().contains(&normalized.as_str()) {
            Ok(normalized)
        } else {
            Err(Error::operator(token))
        }
    }

    /// Quote an alias, stripping any pre-existing quote characters.
    fn prepare_alias(&self, token: &str) -> Result<String> {
        let quoted = self.quote_segment(token);
        if quoted.len() == 2 {
            return Err(Error::argument("alias must not be empty"));
        }
        Ok(quoted)
    }

    /// Validate a natural number (limit/offset and friends).
    fn prepare_natural(&self, value: i64) -> Result<u64> {
        u64::try_from(value)
            .map_err(|_| Error::argument(format!("expected a natural number, got {value}")))
    }

    /// Render an identifier expression.
    ///
    /// Sub-selects render parenthesized; raw wrappers pass through; `SELECT`
    /// text is treated as an inline subquery; anything else is split on `.`
    /// and quoted segment by segment. `*` segments survive unquoted so
    /// wildcards like `t.*` work.
    fn prepare_identifier(&self, expr: &Expr) -> Result<String> {
        match expr {
            Expr::Subquery(builder) => Ok(format!("({})", builder.statement(false).text())),
            Expr::Raw(text) => Ok(text.clone()),
            Expr::Name(name) => {
                let name = name.trim();
                if name
                    .get(..7)
                    .is_some_and(|prefix| prefix.eq_ignore_ascii_case("select "))
                {
                    return Ok(format!("({})", Command::trim(name)));
                }
                Ok(name
                    .split('.')
                    .map(|segment| self.quote_segment(segment))
                    .collect::<Vec<_>>()
                    .join("."))
            }
        }
    }

    /// Quote one dotted segment, stripping embedded quote characters first
    /// so user input cannot break out of the quoting.
    fn quote_segment(&self, segment: &str) -> String {
        let cleaned: String = segment
            .chars()
            .filter(|c| !matches!(c, '"' | '\'' | '`' | '[' | ']'))
            .collect();
        let cleaned = cleaned.trim();
        if cleaned == "*" {
            return cleaned.to_string();
        }
        let (open, close) = self.quotes();
        format!("{open}{cleaned}{close}")
    }

    /// Escape and quote a string literal. Embedded quotes are doubled and
    /// control characters stripped; dialects with further escape characters
    /// override this.
    fn quote_string(&self, value: &str) -> String {
        let cleaned = strip_control_chars(value);
        format!("'{}'", cleaned.replace('\'', "''"))
    }

    /// Render binary data. Defaults to the standard hex-string form.
    fn prepare_bytes(&self, bytes: &[u8]) -> String {
        format!("X'{}'", hex_upper(bytes))
    }

    /// Render a literal value.
    fn prepare_value(&self, value: &Value) -> Result<String> {
        match value {
            Value::Null => Ok("NULL".to_string()),
            Value::Bool(b) => Ok(self.prepare_boolean(*b)),
            Value::Int(n) => Ok(n.to_string()),
            Value::Float(n) => Ok(n.to_string()),
            Value::Decimal(d) => Ok(d.to_string()),
            Value::String(s) => Ok(self.quote_string(s)),
            Value::Timestamp(ts) => Ok(self.quote_string(ts)),
            Value::Uuid(u) => Ok(format!("'{u}'")),
            Value::Bytes(b) => Ok(self.prepare_bytes(b)),
            Value::Array(values) => {
                let rendered = values
                    .iter()
                    .map(|v| self.prepare_value(v))
                    .collect::<Result<Vec<_>>>()?;
                Ok(format!("({})", rendered.join(", ")))
            }
            Value::Subquery(builder) => Ok(format!("({})", builder.statement(false).text())),
            Value::Raw(text) => Ok(text.clone()),
        }
    }
}
