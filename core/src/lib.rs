//! Dialect-neutral SQL statement builder.
//!
//! Build a statement once against an abstract model, render it correctly for
//! MySQL, Drizzle, PostgreSQL, SQLite, MsSQL, Oracle, and Firebird. Every
//! token is precompiled into dialect-safe text the moment it enters the
//! model, so final assembly is pure string composition.
//!
//! ```ignore
//! use polysql_core::prelude::*;
//!
//! let cmd = SelectBuilder::new(Dialect::PostgreSql)
//!     .column("id")?
//!     .column("name")?
//!     .from("users")?
//!     .filter("age", ">", 18)?
//!     .order_by("name", "ASC")?
//!     .limit(10)?
//!     .statement(true);
//! assert_eq!(cmd.text(), r#"SELECT "id", "name" FROM "users" WHERE "age" > 18 ORDER BY "name" ASC LIMIT 10;"#);
//! ```

pub mod ast;
pub mod command;
pub mod connection;
pub mod dialect;
pub mod error;

mod transpiler;

pub use command::Command;
pub use dialect::Dialect;
pub use error::{Error, Result};

/// Ergonomic alias for the select builder - the primary entry point.
pub type Select = ast::SelectBuilder;

pub mod prelude {
    pub use crate::ast::{
        Combinable, DeleteBuilder, Expr, InsertBuilder, LockBuilder, SelectBuilder, UpdateBuilder,
        Value,
    };
    pub use crate::command::Command;
    pub use crate::connection::{
        Connection, ConnectionState, DataReader, DataSource, DriverRegistry, ResultSet, Row,
    };
    pub use crate::dialect::{Dialect, OperatorGroup, Precompiler};
    pub use crate::error::{Error, Result};
    pub use crate::Select;
}
