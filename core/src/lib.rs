//! # Masktab Core
//!
//! Reversible field-masking subsystem for tabular personnel records.
//! This crate provides the record store, the deterministic masking engine
//! with its mapping table, and the CSV import/export pipeline.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod csv;
pub mod error;
pub mod masking;
pub mod models;
pub mod store;

/// Re-export common types for ease of use
pub use config::{CoreConfig, CsvConfig, MaskingConfig};
pub use csv::{export_csv, import_csv, ImportReport, ImportWarning};
pub use error::{MaskError, Result};
pub use masking::{
    MappingEntry, MaskSelection, MaskingEngine, MaskingOutcome, MaskingRun, ProgressObserver,
    ProgressUpdate,
};
pub use models::{ColumnSchema, Record, Value};
pub use store::RecordStore;

/// Version of the core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
