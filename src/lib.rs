/// Masktab - reversible field masking for tabular personnel records
///
/// This is the root crate that provides workspace-level documentation.
/// Actual implementation is in the subcrates:
/// - `masktab-core`: record store, masking engine, and CSV pipeline
/// - `masktab-cli`: command-line front-end for the masking pipeline

/// This module is intentionally empty as the actual implementation
/// is in the subcrates.
/// Returns the version of the package.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
