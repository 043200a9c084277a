//! Record store
//!
//! This module provides the ordered collection of original records shared by
//! the masking engine and the import/export pipeline. A record's identity is
//! its position in the store: handles are derived from row ordinals, so rows
//! are appended and edited in place but never removed or reordered.

use serde::{Serialize, Deserialize};

use crate::error::{MaskError, Result};
use crate::models::{ColumnSchema, Record, Value};

/// Ordered collection of original records plus their shared column schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordStore {
    /// Column schema shared by every record
    schema: ColumnSchema,

    /// Records in insertion order; row ordinal = index
    records: Vec<Record>,
}

impl RecordStore {
    /// Create a new store with a seed collection of records
    pub fn new(schema: ColumnSchema, seed: Vec<Record>) -> Self {
        RecordStore {
            schema,
            records: seed,
        }
    }

    /// Create a new empty store
    pub fn empty(schema: ColumnSchema) -> Self {
        Self::new(schema, Vec::new())
    }

    /// Get the column schema
    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    /// Number of records in the store
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append records to the end of the store
    ///
    /// Existing row ordinals are append-stable: new records always receive
    /// the next free indices, so prior ordinals never renumber.
    pub fn append(&mut self, records: Vec<Record>) {
        self.records.extend(records);
    }

    /// Replace exactly one field of an existing record
    ///
    /// All other fields of the row are untouched.
    pub fn update_field(
        &mut self,
        row: usize,
        column: &str,
        value: impl Into<Value>,
    ) -> Result<()> {
        if !self.schema.has_column(column) {
            return Err(MaskError::UnknownColumn(column.to_string()));
        }
        let rows = self.records.len();
        let record = self
            .records
            .get_mut(row)
            .ok_or(MaskError::OutOfRange { row, rows })?;
        record.set(column, value);
        Ok(())
    }

    /// Get a read-only view of a single record
    pub fn get(&self, row: usize) -> Option<&Record> {
        self.records.get(row)
    }

    /// Read-only copy of the current records, in row-ordinal order
    pub fn snapshot(&self) -> Vec<Record> {
        self.records.clone()
    }
}
