//! Rendered SQL commands.

use serde::{Deserialize, Serialize};

/// An immutable rendered SQL string plus its terminator flag.
///
/// Produced once per `statement()` call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    text: String,
    terminated: bool,
}

impl Command {
    /// Wrap rendered SQL text, appending the terminator when requested.
    pub fn new(text: impl Into<String>, terminated: bool) -> Self {
        let mut text = text.into();
        if terminated && !text.ends_with(';') {
            text.push(';');
        }
        Self { text, terminated }
    }

    /// An empty placeholder, used before anything has executed.
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            terminated: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Strip a trailing terminator and surrounding whitespace from SQL text.
    pub fn trim(text: &str) -> &str {
        text.trim_end().trim_end_matches(';').trim_end()
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl Default for Command {
    fn default() -> Self {
        Self::empty()
    }
}
