//! The connection and data-reader contract.
//!
//! Synchronous, single-threaded: every operation blocks and runs to
//! completion on the caller's thread. One connection owns exactly one
//! backend resource; callers needing concurrency use one connection per
//! unit of work.

pub mod datasource;
pub mod reader;
pub mod registry;

pub use datasource::DataSource;
pub use reader::{DataReader, ResultSet, Row};
pub use registry::DriverRegistry;

use crate::command::Command;
use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Control bytes `quote` removes, URL-encoded and literal. Stripping runs
/// to a fixpoint so removing one layer cannot uncover another.
static REMOVABLES: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"%0[0-8bcef]").unwrap(),
        Regex::new(r"%1[0-9a-f]").unwrap(),
        Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]+").unwrap(),
    ]
});

/// Escape a string for direct inclusion in an SQL command.
pub fn quote_string(input: &str, escape: Option<char>) -> String {
    let mut text = input.to_string();
    loop {
        let mut changed = false;
        for pattern in REMOVABLES.iter() {
            let replaced = pattern.replace_all(&text, "");
            if replaced != text {
                changed = true;
                text = replaced.into_owned();
            }
        }
        if !changed {
            break;
        }
    }
    let mut quoted = format!("'{}'", text.replace('\'', "''"));
    if let Some(escape) = escape {
        quoted.push_str(&format!(" ESCAPE '{escape}'"));
    }
    quoted
}

/// Connection lifecycle states. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Unopened,
    Open,
    Closed,
}

/// A single logical connection to one backend.
///
/// Lifecycle: constructed from a [`DataSource`] descriptor, `open()`
/// establishes the resource, `execute()`/`query()` use it, `close()`
/// releases it. Execution while not open fails with [`Error::Sql`].
/// Transactions are strictly `begin -> (commit | rollback)`, non-reentrant.
pub trait Connection {
    /// The descriptor this connection was constructed from.
    fn data_source(&self) -> &DataSource;

    fn state(&self) -> ConnectionState;

    /// Establish the backend resource. A no-op when already open; a closed
    /// connection cannot be reopened.
    fn open(&mut self) -> Result<()>;

    /// Release the backend resource; reports whether an open connection was
    /// closed. Idempotent.
    fn close(&mut self) -> Result<bool>;

    fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Open
    }

    /// The most recently executed command, for diagnostics.
    fn last_command(&self) -> &Command;

    /// The driver-level backend handle, for callers that need to reach
    /// below the contract. Fails with [`Error::Connection`] when no
    /// connection has been established.
    fn resource(&self) -> Result<&dyn std::any::Any>;

    fn begin_transaction(&mut self) -> Result<()>;

    fn commit(&mut self) -> Result<()>;

    fn rollback(&mut self) -> Result<()>;

    /// Process a command that returns no result data.
    fn execute(&mut self, command: Command) -> Result<()>;

    /// Process a command and return a forward-only reader over its rows.
    /// The reader owns the driver-level result handle; free it.
    fn reader(&mut self, command: Command) -> Result<Box<dyn DataReader>>;

    /// Process a command and drain the reader into an indexed result set.
    fn query(&mut self, command: Command) -> Result<ResultSet> {
        tracing::debug!(sql = command.text(), "query");
        let mut reader = self.reader(command)?;
        let results = ResultSet::from_reader(reader.as_mut());
        reader.free();
        Ok(results)
    }

    /// The last generated key, when the backend tracks one.
    fn last_insert_id(&mut self) -> Result<i64>;

    /// Quote a string for direct inclusion in a command, appending an
    /// `ESCAPE` clause when an escape character is supplied.
    fn quote(&self, input: &str, escape: Option<char>) -> Result<String> {
        if !self.is_connected() {
            return Err(Error::sql(
                "failed to quote string: no open connection",
            ));
        }
        Ok(quote_string(input, escape))
    }
}
