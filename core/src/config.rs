//! Configuration for the core crate
//!
//! This module provides configuration options for the masking subsystem,
//! including the handle format, progress cadence, and CSV dialect settings.

use serde::{Serialize, Deserialize};

/// Masking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskingConfig {
    /// Prefix embedded in every generated handle
    pub handle_prefix: String,

    /// Emit a progress update every N processed records
    pub progress_every: usize,
}

impl Default for MaskingConfig {
    fn default() -> Self {
        MaskingConfig {
            handle_prefix: "@user".to_string(),
            progress_every: 1,
        }
    }
}

/// CSV pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvConfig {
    /// Field delimiter
    pub delimiter: char,

    /// Identifying column that must be non-empty for an imported row
    /// to be accepted
    pub mandatory_column: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        CsvConfig {
            delimiter: ',',
            mandatory_column: "氏名".to_string(),
        }
    }
}

/// Top-level configuration for the masking subsystem
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Masking configuration
    #[serde(default)]
    pub masking: MaskingConfig,

    /// CSV pipeline configuration
    #[serde(default)]
    pub csv: CsvConfig,
}

impl CoreConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration for testing
    pub fn for_testing() -> Self {
        Self {
            // Emit every update so tests can observe the full progress sequence
            masking: MaskingConfig {
                progress_every: 1,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}
