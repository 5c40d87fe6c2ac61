//! Table-lock builders.
//!
//! Lock grammar is one of the dialect-divergence points: the MySQL family
//! has `LOCK TABLES`/`UNLOCK TABLES`, PostgreSQL locks inside a
//! transaction, and the remaining dialects fall back to an exclusive
//! transaction.

use crate::ast::Expr;
use crate::command::Command;
use crate::connection::Connection;
use crate::dialect::Dialect;
use crate::error::Result;
use once_cell::sync::Lazy;
use regex::Regex;

/// MySQL-family lock mode hints.
static HINT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^((LOW_PRIORITY )?WRITE)|(READ( LOCAL)?)$").unwrap());

/// Accumulates table-lock definitions, then acquires or releases them on a
/// connection.
#[derive(Debug, Clone)]
pub struct LockBuilder {
    dialect: Dialect,
    data: Vec<String>,
}

impl LockBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            data: Vec::new(),
        }
    }

    /// Add a lock definition for a table. Hints apply to the MySQL family
    /// only (`WRITE`, `LOW_PRIORITY WRITE`, `READ`, `READ LOCAL`);
    /// unrecognized hints are dropped and `WRITE` is the default.
    pub fn add(mut self, table: impl Into<Expr>, hints: &[&str]) -> Result<Self> {
        let table = self.dialect.precompiler().prepare_identifier(&table.into())?;
        if self.dialect.is_mysql_family() {
            let mut modes: Vec<String> = hints
                .iter()
                .filter(|hint| HINT.is_match(hint))
                .map(|hint| hint.to_uppercase())
                .collect();
            if modes.is_empty() {
                modes.push("WRITE".to_string());
            }
            self.data.push(format!("{table} {}", modes.join("|")));
        } else {
            self.data.push(table);
        }
        Ok(self)
    }

    /// Acquire the accumulated locks.
    pub fn acquire(&self, connection: &mut dyn Connection) -> Result<()> {
        match self.dialect {
            Dialect::MySql | Dialect::Drizzle => connection.execute(Command::new(
                format!("LOCK TABLES {}", self.data.join(",")),
                true,
            )),
            Dialect::PostgreSql => {
                connection.begin_transaction()?;
                for table in &self.data {
                    connection.execute(Command::new(
                        format!("LOCK TABLE {table} IN ACCESS EXCLUSIVE MODE"),
                        true,
                    ))?;
                }
                Ok(())
            }
            _ => connection.begin_transaction(),
        }
    }

    /// Release all acquired locks.
    pub fn release(&self, connection: &mut dyn Connection) -> Result<()> {
        match self.dialect {
            Dialect::MySql | Dialect::Drizzle => {
                connection.execute(Command::new("UNLOCK TABLES", true))
            }
            _ => connection.commit(),
        }
    }
}
