//! Error types shared by the builders, precompilers, and connection layer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A literal, identifier, or clause argument has an unsupported shape.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A token outside the dialect's enumerated operator/join/connector/parenthesis set.
    #[error("invalid operator: '{0}'")]
    InvalidOperator(String),

    /// An execution failure reported by the backend.
    #[error("sql error: {0}")]
    Sql(String),

    /// A connection could not be established or resolved.
    #[error("connection error: {0}")]
    Connection(String),
}

impl Error {
    /// Create an invalid-argument error.
    pub fn argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create an invalid-operator error for the offending token.
    pub fn operator(token: impl Into<String>) -> Self {
        Self::InvalidOperator(token.into())
    }

    /// Wrap a backend execution failure.
    pub fn sql(message: impl Into<String>) -> Self {
        Self::Sql(message.into())
    }

    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }
}

/// Result type alias for builder and connection operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::operator("<=>");
        assert_eq!(err.to_string(), "invalid operator: '<=>'");

        let err = Error::sql("relation \"users\" does not exist");
        assert_eq!(err.to_string(), "sql error: relation \"users\" does not exist");
    }
}
