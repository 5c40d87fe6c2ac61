//! Driver registration and lookup.
//!
//! An explicit map from `(dialect, driver-name)` to a connection
//! constructor, populated at process start and looked up by key.

use super::datasource::DataSource;
use super::Connection;
use crate::dialect::Dialect;
use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;

/// Constructs a connection from its descriptor.
pub type ConnectionFactory = fn(DataSource) -> Result<Box<dyn Connection>>;

/// Maps `(dialect, driver-name)` to a connection constructor. Driver names
/// are case-insensitive.
#[derive(Default)]
pub struct DriverRegistry {
    factories: HashMap<(Dialect, String), ConnectionFactory>,
}

impl DriverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        dialect: Dialect,
        driver: impl Into<String>,
        factory: ConnectionFactory,
    ) {
        let driver = driver.into().to_lowercase();
        tracing::debug!(dialect = %dialect, driver = %driver, "registering connection driver");
        self.factories.insert((dialect, driver), factory);
    }

    /// Construct a connection for the data source's (dialect, driver) pair.
    pub fn connection(&self, data_source: DataSource) -> Result<Box<dyn Connection>> {
        let key = (data_source.dialect, data_source.driver.to_lowercase());
        let factory = self.factories.get(&key).ok_or_else(|| {
            Error::connection(format!(
                "no driver registered for ({}, {})",
                data_source.dialect, data_source.driver
            ))
        })?;
        factory(data_source)
    }
}

static GLOBAL: Lazy<Mutex<DriverRegistry>> = Lazy::new(|| Mutex::new(DriverRegistry::new()));

/// Register a driver in the process-wide registry.
pub fn register_driver(
    dialect: Dialect,
    driver: impl Into<String>,
    factory: ConnectionFactory,
) -> Result<()> {
    let mut registry = GLOBAL
        .lock()
        .map_err(|_| Error::connection("driver registry lock poisoned"))?;
    registry.register(dialect, driver, factory);
    Ok(())
}

/// Construct a connection through the process-wide registry.
pub fn connect(data_source: DataSource) -> Result<Box<dyn Connection>> {
    let registry = GLOBAL
        .lock()
        .map_err(|_| Error::connection("driver registry lock poisoned"))?;
    registry.connection(data_source)
}
