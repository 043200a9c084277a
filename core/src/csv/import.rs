//! CSV import
//!
//! This module parses an external CSV payload into records ready to be
//! merged into a store. Unquoting is deliberately simplified: every
//! double-quote character is stripped, so delimiters or newlines embedded
//! inside quoted fields are not reconstructed. Export quoting is the proper
//! escape; the asymmetry is documented behavior.

use log::warn;
use serde::{Serialize, Deserialize};

use crate::config::CsvConfig;
use crate::models::{ColumnSchema, Record, Value};

/// A line dropped during import, with the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportWarning {
    /// 1-based line number within the payload (header is line 1)
    pub line: usize,

    /// Why the line was dropped
    pub reason: String,
}

/// Aggregated outcome of one import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Rows accepted into the result
    pub imported: usize,

    /// Rows dropped for a missing mandatory field
    pub skipped: usize,

    /// One warning per dropped row; never aborts the import
    pub warnings: Vec<ImportWarning>,
}

/// Parse a CSV payload into records
///
/// Line 0 is the header; whitespace-only lines are discarded. Field values
/// are zipped against the header text, so schema columns missing from the
/// header fill with empty text and header columns outside the schema are
/// ignored. A row is accepted only if the configured mandatory identifying
/// column is non-empty; otherwise it is dropped and counted in the report.
///
/// The observer receives a monotonically increasing ratio
/// `processed / total` after each data line, for a progress surface.
pub fn import_csv(
    payload: &str,
    schema: &ColumnSchema,
    config: &CsvConfig,
    mut progress: impl FnMut(f64),
) -> (Vec<Record>, ImportReport) {
    let mut lines = payload.lines().enumerate();

    let header: Vec<String> = match lines.next() {
        Some((_, line)) => split_fields(line, config.delimiter)
            .into_iter()
            .map(|field| field.trim().to_string())
            .collect(),
        None => {
            progress(1.0);
            return (Vec::new(), ImportReport::default());
        }
    };

    let data_lines: Vec<(usize, &str)> = lines
        .filter(|(_, line)| !line.trim().is_empty())
        .collect();
    let total = data_lines.len();

    // Position of each schema column within the header, resolved once
    let header_positions: Vec<(&str, Option<usize>)> = schema
        .iter()
        .map(|column| (column, header.iter().position(|h| h == column)))
        .collect();

    let mut records = Vec::new();
    let mut report = ImportReport::default();

    for (processed, (index, line)) in data_lines.into_iter().enumerate() {
        let values = split_fields(line, config.delimiter);
        let mut record = Record::new();
        for &(column, position) in &header_positions {
            let raw = position
                .and_then(|i| values.get(i))
                .map(|v| unquote(v))
                .unwrap_or_default();
            record.set(column, Value::Text(raw));
        }

        if record.get_or_empty(&config.mandatory_column).is_empty() {
            let line_number = index + 1;
            warn!(
                "Skipping line {}: mandatory column {} is empty",
                line_number, config.mandatory_column
            );
            report.skipped += 1;
            report.warnings.push(ImportWarning {
                line: line_number,
                reason: format!("mandatory column {} is empty", config.mandatory_column),
            });
        } else {
            records.push(record);
            report.imported += 1;
        }

        progress((processed + 1) as f64 / total as f64);
    }

    if total == 0 {
        progress(1.0);
    }

    (records, report)
}

/// Split one line into raw fields
fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    line.split(delimiter).map(str::to_string).collect()
}

/// Simplified unquoting: strip every double-quote character
fn unquote(field: &str) -> String {
    field.replace('"', "")
}
