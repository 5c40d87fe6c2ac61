//! The dialect-neutral statement model and its fluent builders.

mod conditions;
mod delete;
mod expr;
mod insert;
mod lock;
mod select;
mod update;
mod values;

pub use delete::DeleteBuilder;
pub use expr::Expr;
pub use insert::InsertBuilder;
pub use lock::LockBuilder;
pub use select::{Combinable, JoinClause, SelectBuilder};
pub use update::UpdateBuilder;
pub use values::Value;
