//! Column schema representation
//!
//! This module provides the ordered list of column identifiers shared by
//! every record in a store. The schema is declared once, fixed for the
//! lifetime of the store, and determines header order on export.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use serde::{Serialize, Deserialize};

use crate::error::{MaskError, Result};

/// Ordered sequence of unique column identifiers
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Column identifiers in declaration order
    columns: Vec<String>,
}

impl Debug for ColumnSchema {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "ColumnSchema {{ {} columns }}", self.columns.len())
    }
}

impl ColumnSchema {
    /// Create a new schema, rejecting duplicate identifiers
    pub fn new<I, C>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].contains(column) {
                return Err(MaskError::DuplicateColumn(column.clone()));
            }
        }
        Ok(ColumnSchema { columns })
    }

    /// Check if the schema has a column
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Get the position of a column within the schema
    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Iterate over column identifiers in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    /// Column identifiers as a slice
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the schema has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
