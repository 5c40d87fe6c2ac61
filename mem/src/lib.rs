//! In-memory reference driver for the polysql connection contract.
//!
//! Nothing is parsed or persisted: executed commands are recorded, and each
//! `reader`/`query` call pops a pre-seeded row queue. Deterministic by
//! construction, which is what contract tests and fixtures need. Real
//! engine drivers live outside this workspace and implement the same
//! traits.
//!
//! ```ignore
//! use polysql_core::prelude::*;
//! use polysql_mem::MemoryConnection;
//!
//! let mut conn = MemoryConnection::new(DataSource::new("test", Dialect::Sqlite));
//! conn.push_rows(vec![Row::new().with("id", 1)]);
//! conn.open()?;
//! let results = conn.query(Command::new("SELECT 1", true))?;
//! assert_eq!(results.count(), 1);
//! ```

use polysql_core::ast::Value;
use polysql_core::connection::{Connection, ConnectionState, DataReader, DataSource, Row};
use polysql_core::{Command, Error, Result};
use std::collections::VecDeque;

/// A connection whose backend is a queue of canned result sets.
pub struct MemoryConnection {
    data_source: DataSource,
    state: ConnectionState,
    command: Command,
    results: VecDeque<Vec<Row>>,
    executed: Vec<Command>,
    in_transaction: bool,
    last_insert_id: i64,
}

impl MemoryConnection {
    pub fn new(data_source: DataSource) -> Self {
        Self {
            data_source,
            state: ConnectionState::Unopened,
            command: Command::empty(),
            results: VecDeque::new(),
            executed: Vec::new(),
            in_transaction: false,
            last_insert_id: 0,
        }
    }

    /// Registry-compatible constructor.
    pub fn factory(data_source: DataSource) -> Result<Box<dyn Connection>> {
        Ok(Box::new(Self::new(data_source)))
    }

    /// Seed the rows returned by the next `reader`/`query` call. Queues
    /// stack: one seeded set per subsequent call.
    pub fn push_rows(&mut self, rows: Vec<Row>) {
        self.results.push_back(rows);
    }

    /// Every command processed so far, in execution order.
    pub fn executed(&self) -> &[Command] {
        &self.executed
    }

    pub fn in_transaction(&self) -> bool {
        self.in_transaction
    }

    fn guard_open(&self) -> Result<()> {
        if self.state != ConnectionState::Open {
            return Err(Error::sql("unable to find an open connection"));
        }
        Ok(())
    }

    fn record(&mut self, command: Command) {
        if Command::trim(command.text())
            .trim_start()
            .get(..6)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("insert"))
        {
            self.last_insert_id += 1;
        }
        self.executed.push(command.clone());
        self.command = command;
    }
}

impl Connection for MemoryConnection {
    fn data_source(&self) -> &DataSource {
        &self.data_source
    }

    fn state(&self) -> ConnectionState {
        self.state
    }

    fn open(&mut self) -> Result<()> {
        match self.state {
            ConnectionState::Open => Ok(()),
            ConnectionState::Unopened => {
                tracing::debug!(id = %self.data_source.id, "opening memory connection");
                self.state = ConnectionState::Open;
                Ok(())
            }
            ConnectionState::Closed => Err(Error::connection(
                "connection has been closed and cannot be reopened",
            )),
        }
    }

    fn close(&mut self) -> Result<bool> {
        if self.state != ConnectionState::Open {
            return Ok(false);
        }
        self.state = ConnectionState::Closed;
        self.in_transaction = false;
        Ok(true)
    }

    fn last_command(&self) -> &Command {
        &self.command
    }

    fn resource(&self) -> Result<&dyn std::any::Any> {
        if self.state != ConnectionState::Open {
            return Err(Error::connection(
                "unable to fetch resource: no connection has been established",
            ));
        }
        Ok(&self.results)
    }

    fn begin_transaction(&mut self) -> Result<()> {
        self.guard_open()?;
        if self.in_transaction {
            return Err(Error::sql("a transaction is already active"));
        }
        self.in_transaction = true;
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.guard_open()?;
        if !self.in_transaction {
            return Err(Error::sql("no active transaction to commit"));
        }
        self.in_transaction = false;
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        self.guard_open()?;
        if !self.in_transaction {
            return Err(Error::sql("no active transaction to roll back"));
        }
        self.in_transaction = false;
        Ok(())
    }

    fn execute(&mut self, command: Command) -> Result<()> {
        self.guard_open()?;
        tracing::debug!(sql = command.text(), "execute");
        self.record(command);
        Ok(())
    }

    fn reader(&mut self, command: Command) -> Result<Box<dyn DataReader>> {
        self.guard_open()?;
        let rows = self.results.pop_front().unwrap_or_default();
        self.record(command);
        Ok(Box::new(MemoryReader::new(rows)))
    }

    fn last_insert_id(&mut self) -> Result<i64> {
        self.guard_open()?;
        Ok(self.last_insert_id)
    }
}

/// A forward-only cursor over a seeded row set.
pub struct MemoryReader {
    rows: std::vec::IntoIter<Row>,
    current: Option<Row>,
}

impl MemoryReader {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows: rows.into_iter(),
            current: None,
        }
    }
}

impl DataReader for MemoryReader {
    fn read(&mut self) -> bool {
        self.current = self.rows.next();
        self.current.is_some()
    }

    fn row(&self) -> Option<&Row> {
        self.current.as_ref()
    }

    fn free(&mut self) {
        self.rows = Vec::new().into_iter();
        self.current = None;
    }
}

/// Look up typed values off a row with less ceremony in assertions.
pub fn int_of(row: &Row, column: &str) -> Option<i64> {
    match row.get(column) {
        Some(Value::Int(n)) => Some(*n),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polysql_core::connection::registry;
    use polysql_core::Dialect;
    use pretty_assertions::assert_eq;

    fn connection() -> MemoryConnection {
        MemoryConnection::new(DataSource::new("test", Dialect::Sqlite).with_driver("memory"))
    }

    fn seeded_rows() -> Vec<Row> {
        vec![
            Row::new().with("id", 1).with("name", "A"),
            Row::new().with("id", 2).with("name", "B"),
        ]
    }

    #[test]
    fn test_execute_requires_an_open_connection() {
        let mut conn = connection();
        let err = conn.execute(Command::new("DELETE FROM t", true));
        assert!(matches!(err, Err(Error::Sql(_))));

        conn.open().unwrap();
        conn.execute(Command::new("DELETE FROM t", true)).unwrap();
        assert_eq!(conn.last_command().text(), "DELETE FROM t;");

        conn.close().unwrap();
        let err = conn.execute(Command::new("DELETE FROM t", true));
        assert!(matches!(err, Err(Error::Sql(_))));
    }

    #[test]
    fn test_resource_requires_an_established_connection() {
        let mut conn = connection();
        assert!(matches!(conn.resource(), Err(Error::Connection(_))));
        conn.open().unwrap();
        assert!(conn.resource().is_ok());
    }

    #[test]
    fn test_closed_connections_stay_closed() {
        let mut conn = connection();
        conn.open().unwrap();
        assert!(conn.close().unwrap());
        // Idempotent close, and no reopening.
        assert!(!conn.close().unwrap());
        assert!(matches!(conn.open(), Err(Error::Connection(_))));
    }

    #[test]
    fn test_query_drains_the_seeded_rows() {
        let mut conn = connection();
        conn.push_rows(seeded_rows());
        conn.open().unwrap();

        let results = conn.query(Command::new("SELECT * FROM t", true)).unwrap();
        assert_eq!(results.count(), 2);
        assert_eq!(int_of(results.get(0).unwrap(), "id"), Some(1));

        // The queue is consumed; the next query sees no rows.
        let results = conn.query(Command::new("SELECT * FROM t", true)).unwrap();
        assert_eq!(results.count(), 0);
    }

    #[test]
    fn test_reader_is_forward_only_and_free_is_idempotent() {
        let mut conn = connection();
        conn.push_rows(seeded_rows());
        conn.open().unwrap();

        let mut reader = conn.reader(Command::new("SELECT * FROM t", true)).unwrap();
        assert!(reader.read());
        assert!(reader.read());
        assert!(!reader.read());
        // Exhaustion is terminal.
        assert!(!reader.read());
        assert!(reader.row().is_none());

        reader.free();
        reader.free();
        assert!(!reader.read());
    }

    #[test]
    fn test_free_midway_discards_the_rest() {
        let mut conn = connection();
        conn.push_rows(seeded_rows());
        conn.open().unwrap();

        let mut reader = conn.reader(Command::new("SELECT * FROM t", true)).unwrap();
        assert!(reader.read());
        reader.free();
        assert!(!reader.read());
        assert!(reader.row().is_none());
    }

    #[test]
    fn test_transactions_do_not_nest() {
        let mut conn = connection();
        conn.open().unwrap();

        conn.begin_transaction().unwrap();
        assert!(matches!(conn.begin_transaction(), Err(Error::Sql(_))));
        conn.commit().unwrap();
        assert!(matches!(conn.commit(), Err(Error::Sql(_))));

        conn.begin_transaction().unwrap();
        conn.rollback().unwrap();
        assert!(!conn.in_transaction());
    }

    #[test]
    fn test_quote_requires_an_open_connection() {
        let mut conn = connection();
        assert!(conn.quote("it's", None).is_err());
        conn.open().unwrap();
        assert_eq!(conn.quote("it's", None).unwrap(), "'it''s'");
        assert_eq!(conn.quote("10%", Some('!')).unwrap(), "'10%' ESCAPE '!'");
    }

    #[test]
    fn test_last_insert_id_counts_inserts() {
        let mut conn = connection();
        conn.open().unwrap();
        assert_eq!(conn.last_insert_id().unwrap(), 0);
        conn.execute(Command::new("INSERT INTO t (a) VALUES (1)", true))
            .unwrap();
        conn.execute(Command::new("UPDATE t SET a = 2", true)).unwrap();
        assert_eq!(conn.last_insert_id().unwrap(), 1);
    }

    #[test]
    fn test_registry_constructs_by_dialect_and_driver() {
        let mut registry = registry::DriverRegistry::new();
        registry.register(Dialect::Sqlite, "memory", MemoryConnection::factory);

        let source = DataSource::new("test", Dialect::Sqlite).with_driver("Memory");
        let mut conn = registry.connection(source).unwrap();
        conn.open().unwrap();
        assert!(conn.is_connected());

        let unknown = DataSource::new("test", Dialect::Oracle).with_driver("memory");
        assert!(matches!(
            registry.connection(unknown),
            Err(Error::Connection(_))
        ));
    }
}
