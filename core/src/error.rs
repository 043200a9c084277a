//! Error types for the core crate
//!
//! This module provides a consolidated error type for the masking subsystem,
//! covering store access, schema misuse, and mask-set misuse.

use thiserror::Error;
use std::io;

/// Core error type
#[derive(Error, Debug)]
pub enum MaskError {
    /// Row ordinal does not address an existing row
    #[error("Row {row} is out of range (store has {rows} rows)")]
    OutOfRange {
        /// Requested row ordinal
        row: usize,
        /// Number of rows in the store
        rows: usize,
    },

    /// Column identifier is not part of the column schema
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Column identifier appears more than once
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// Column is not part of the selected mask set
    #[error("Column is not selected for masking: {0}")]
    ColumnNotSelected(String),

    /// A masking run was started with zero selected columns
    #[error("No columns selected for masking; select at least one column before starting")]
    EmptyMaskSet,

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for the core crate
pub type Result<T> = std::result::Result<T, MaskError>;

impl MaskError {
    /// Whether the error is a programming-contract violation rather than a
    /// user-recoverable condition
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            MaskError::OutOfRange { .. }
                | MaskError::UnknownColumn(_)
                | MaskError::DuplicateColumn(_)
                | MaskError::ColumnNotSelected(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MaskError::OutOfRange { row: 7, rows: 2 };
        assert_eq!(err.to_string(), "Row 7 is out of range (store has 2 rows)");

        let err = MaskError::UnknownColumn("部署".to_string());
        assert_eq!(err.to_string(), "Unknown column: 部署");

        let err = MaskError::EmptyMaskSet;
        assert!(err.to_string().contains("at least one column"));
    }

    #[test]
    fn test_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: MaskError = io_err.into();
        match err {
            MaskError::IoError(_) => {}
            _ => panic!("Expected IoError variant"),
        }
    }

    #[test]
    fn test_contract_violation_classification() {
        assert!(MaskError::OutOfRange { row: 0, rows: 0 }.is_contract_violation());
        assert!(MaskError::UnknownColumn("x".to_string()).is_contract_violation());
        assert!(MaskError::ColumnNotSelected("x".to_string()).is_contract_violation());
        assert!(!MaskError::EmptyMaskSet.is_contract_violation());
    }
}
