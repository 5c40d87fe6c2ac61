//! Forward-only data readers and indexed result sets.

use crate::ast::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One result row: column name to value, in select-list order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Row {
    columns: IndexMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion, mainly for fixtures and drivers.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.columns.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// A forward-only cursor over one executed command's result rows.
///
/// The reader is the exclusive owner of its driver-level result handle;
/// call [`DataReader::free`] to release it deterministically - backend
/// cursors are not reclaimed automatically.
pub trait DataReader {
    /// Advance to the next record; false once the cursor is exhausted. The
    /// exhausted state is terminal and re-reads as empty.
    fn read(&mut self) -> bool;

    /// The current record, if `read` has produced one.
    fn row(&self) -> Option<&Row>;

    /// Release driver-level handles. Idempotent; a freed reader reports no
    /// more rows rather than failing.
    fn free(&mut self);
}

/// An indexed, eagerly materialized result set.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    records: Vec<Row>,
    position: usize,
}

impl ResultSet {
    pub fn new(records: Vec<Row>) -> Self {
        Self {
            records,
            position: 0,
        }
    }

    /// Drain a reader into an indexed set.
    pub fn from_reader(reader: &mut dyn DataReader) -> Self {
        let mut records = Vec::new();
        while reader.read() {
            if let Some(row) = reader.row() {
                records.push(row.clone());
            }
        }
        Self::new(records)
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_loaded(&self) -> bool {
        !self.records.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// The record at the current position, advancing past it.
    pub fn fetch(&mut self) -> Option<&Row> {
        let row = self.records.get(self.position)?;
        self.position += 1;
        Some(row)
    }

    /// The record at `index`, leaving the position untouched.
    pub fn get(&self, index: usize) -> Option<&Row> {
        self.records.get(index)
    }

    pub fn as_slice(&self) -> &[Row] {
        &self.records
    }

    /// Release the records. The set reads as empty afterwards.
    pub fn dispose(&mut self) {
        self.records.clear();
        self.position = 0;
    }
}

impl IntoIterator for ResultSet {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
