//! Data models for the masking subsystem
//!
//! This module provides data structures for representing personnel records
//! and the column schema they share.

mod record;
mod schema;

pub use record::{Record, Value};
pub use schema::ColumnSchema;
