//! Selected mask set
//!
//! This module provides the operator-chosen subset of columns to mask. The
//! selection is ordered: a column's 1-based position within the selection
//! (not within the full schema) is embedded in every handle generated for
//! it, so reordering or editing the selection re-derives all handles.

use serde::{Serialize, Deserialize};

use crate::error::{MaskError, Result};
use crate::models::ColumnSchema;

/// Ordered subset of schema columns chosen for masking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskSelection {
    /// Selected column identifiers in selection order
    columns: Vec<String>,
}

impl MaskSelection {
    /// Create a selection, validating every column against the schema
    pub fn new<I, C>(schema: &ColumnSchema, columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        for (i, column) in columns.iter().enumerate() {
            if !schema.has_column(column) {
                return Err(MaskError::UnknownColumn(column.clone()));
            }
            if columns[..i].contains(column) {
                return Err(MaskError::DuplicateColumn(column.clone()));
            }
        }
        Ok(MaskSelection { columns })
    }

    /// Create an empty selection
    ///
    /// Representable so callers can hold "nothing selected yet" state, but a
    /// masking run refuses to start from it.
    pub fn none() -> Self {
        MaskSelection {
            columns: Vec::new(),
        }
    }

    /// Position of a column within the selection
    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Whether the column is selected for masking
    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Iterate over selected columns in selection order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    /// Number of selected columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether nothing is selected
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
