//! CSV import/export pipeline
//!
//! This module parses external CSV payloads into records and serializes the
//! masked view back out. Import unquoting is simplified while export
//! quoting is a proper escape; see the module docs for the asymmetry.

pub mod export;
pub mod import;

pub use export::export_csv;
pub use import::{import_csv, ImportReport, ImportWarning};
