//! Masking engine and masking run
//!
//! This module provides the deterministic derivation of masked records and
//! mapping entries from a record snapshot and a selected mask set, plus the
//! progress-reporting run that merges imported records into the store.

mod engine;
mod run;
mod selection;

pub use engine::{MappingEntry, MaskingEngine, MaskingOutcome};
pub use run::{MaskingRun, NullObserver, ProgressObserver, ProgressUpdate};
pub use selection::MaskSelection;
