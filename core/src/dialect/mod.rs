//! SQL dialects and their token precompilers.

pub mod precompiler;

mod drizzle;
mod firebird;
mod mssql;
mod mysql;
mod oracle;
mod postgres;
mod sqlite;

pub use drizzle::DrizzlePrecompiler;
pub use firebird::FirebirdPrecompiler;
pub use mssql::MsSqlPrecompiler;
pub use mysql::MySqlPrecompiler;
pub use oracle::OraclePrecompiler;
pub use postgres::PostgreSqlPrecompiler;
pub use precompiler::{OperatorGroup, Precompiler};
pub use sqlite::SqlitePrecompiler;

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// A target SQL engine's grammar, quoting, and pagination rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    MySql,
    Drizzle,
    PostgreSql,
    Sqlite,
    MsSql,
    Oracle,
    Firebird,
}

impl Dialect {
    /// The precompiler turning raw tokens into this dialect's safe text.
    pub fn precompiler(&self) -> &'static dyn Precompiler {
        match self {
            Dialect::MySql => &MySqlPrecompiler,
            Dialect::Drizzle => &DrizzlePrecompiler,
            Dialect::PostgreSql => &PostgreSqlPrecompiler,
            Dialect::Sqlite => &SqlitePrecompiler,
            Dialect::MsSql => &MsSqlPrecompiler,
            Dialect::Oracle => &OraclePrecompiler,
            Dialect::Firebird => &FirebirdPrecompiler,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::MySql => "MySQL",
            Dialect::Drizzle => "Drizzle",
            Dialect::PostgreSql => "PostgreSQL",
            Dialect::Sqlite => "SQLite",
            Dialect::MsSql => "MsSQL",
            Dialect::Oracle => "Oracle",
            Dialect::Firebird => "Firebird",
        }
    }

    /// Whether this dialect belongs to the MySQL family, which shares
    /// non-standard UPDATE/DELETE ordering and limit clauses.
    pub(crate) fn is_mysql_family(&self) -> bool {
        matches!(self, Dialect::MySql | Dialect::Drizzle)
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Dialect::MySql),
            "drizzle" => Ok(Dialect::Drizzle),
            "postgresql" | "postgres" | "pgsql" => Ok(Dialect::PostgreSql),
            "sqlite" | "sqlite3" => Ok(Dialect::Sqlite),
            "mssql" | "sqlserver" => Ok(Dialect::MsSql),
            "oracle" => Ok(Dialect::Oracle),
            "firebird" => Ok(Dialect::Firebird),
            other => Err(Error::argument(format!("unknown dialect '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_names_round_trip() {
        for dialect in [
            Dialect::MySql,
            Dialect::Drizzle,
            Dialect::PostgreSql,
            Dialect::Sqlite,
            Dialect::MsSql,
            Dialect::Oracle,
            Dialect::Firebird,
        ] {
            let parsed: Dialect = dialect.as_str().parse().unwrap();
            assert_eq!(parsed, dialect);
        }
    }

    #[test]
    fn test_unknown_dialect_is_rejected() {
        assert!("dbase".parse::<Dialect>().is_err());
    }
}
