//! Masking engine
//!
//! This module derives the masked view of a record collection and the
//! mapping table that lets an authorized viewer recover the original
//! values. Both are pure functions of (records, selection): nothing is
//! cached, and recomputing from an unchanged store always yields the
//! same handles for the same (row, column) pairs.

use serde::{Serialize, Deserialize};

use crate::config::MaskingConfig;
use crate::error::{MaskError, Result};
use crate::models::Record;
use crate::store::RecordStore;
use super::selection::MaskSelection;

/// One row of the mapping table: handle back to original value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// Column the masked field belongs to
    pub column: String,

    /// Opaque handle substituted into the masked record
    pub handle: String,

    /// Original cleartext value
    pub original: String,
}

/// Result of one masking derivation
#[derive(Debug, Clone, PartialEq)]
pub struct MaskingOutcome {
    /// Records with every selected field replaced by its handle
    pub masked: Vec<Record>,

    /// Mapping entries in record-major, selection order
    pub mappings: Vec<MappingEntry>,
}

/// Deterministic derivation of masked records and mapping entries
#[derive(Debug, Clone)]
pub struct MaskingEngine {
    /// Masking configuration
    config: MaskingConfig,
}

impl Default for MaskingEngine {
    fn default() -> Self {
        MaskingEngine::new(MaskingConfig::default())
    }
}

impl MaskingEngine {
    /// Create a new engine
    pub fn new(config: MaskingConfig) -> Self {
        MaskingEngine { config }
    }

    /// Generate the handle for one (row, column) pair
    ///
    /// Both ordinals in the handle are 1-based: the row's position in the
    /// store and the column's position in the selection. The column must be
    /// part of the selection; violating that is a caller bug, not an input
    /// error.
    pub fn compute_handle(
        &self,
        row: usize,
        column: &str,
        selection: &MaskSelection,
    ) -> Result<String> {
        let ordinal = selection
            .index_of(column)
            .ok_or_else(|| MaskError::ColumnNotSelected(column.to_string()))?;
        Ok(format!(
            "{}-{}-{}",
            self.config.handle_prefix,
            row + 1,
            ordinal + 1
        ))
    }

    /// Derive the masked view and mapping table for a record snapshot
    ///
    /// Produces one masked record per input record and one mapping entry per
    /// (record, selected column) pair. Mapping entries enumerate record-major
    /// and, within a record, in selection order.
    pub fn mask_all(
        &self,
        records: &[Record],
        selection: &MaskSelection,
    ) -> Result<MaskingOutcome> {
        if selection.is_empty() {
            return Err(MaskError::EmptyMaskSet);
        }

        let mut masked = Vec::with_capacity(records.len());
        let mut mappings = Vec::with_capacity(records.len() * selection.len());

        for (row, record) in records.iter().enumerate() {
            let mut masked_record = record.clone();
            for column in selection.iter() {
                let handle = self.compute_handle(row, column, selection)?;
                mappings.push(MappingEntry {
                    column: column.to_string(),
                    handle: handle.clone(),
                    original: record.get_or_empty(column).to_string(),
                });
                masked_record.set(column, handle);
            }
            masked.push(masked_record);
        }

        Ok(MaskingOutcome { masked, mappings })
    }

    /// Recompute the mapping table for the store's current state
    ///
    /// Read interface for a display surface. Recomputed on every call; a
    /// table read before a store or selection mutation is stale and must
    /// not be patched.
    pub fn mapping_table(
        &self,
        store: &RecordStore,
        selection: &MaskSelection,
    ) -> Result<Vec<MappingEntry>> {
        Ok(self.mask_all(&store.snapshot(), selection)?.mappings)
    }

    /// Recompute the masked view for the store's current state
    pub fn masked_view(
        &self,
        store: &RecordStore,
        selection: &MaskSelection,
    ) -> Result<Vec<Record>> {
        Ok(self.mask_all(&store.snapshot(), selection)?.masked)
    }
}
