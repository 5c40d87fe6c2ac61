use crate::ast::SelectBuilder;
use serde::{Deserialize, Serialize};

/// An identifier-position expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// A plain, possibly dotted identifier (`schema.table.column`).
    Name(String),
    /// Raw SQL passed through unescaped; quoting is the caller's responsibility.
    Raw(String),
    /// A nested sub-select, rendered as `(...)`.
    Subquery(Box<SelectBuilder>),
}

impl From<&str> for Expr {
    fn from(name: &str) -> Self {
        Expr::Name(name.to_string())
    }
}

impl From<String> for Expr {
    fn from(name: String) -> Self {
        Expr::Name(name)
    }
}

impl From<SelectBuilder> for Expr {
    fn from(builder: SelectBuilder) -> Self {
        Expr::Subquery(Box::new(builder))
    }
}

impl From<&SelectBuilder> for Expr {
    fn from(builder: &SelectBuilder) -> Self {
        Expr::Subquery(Box::new(builder.clone()))
    }
}
