//! Personnel record representation
//!
//! This module provides data structures for representing a single tabular
//! record and the scalar values stored in its fields.

use std::collections::HashMap;
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use serde::{Serialize, Deserialize};

/// Scalar value held in a record field
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Numeric value
    Number(f64),

    /// Text value
    Text(String),
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Value::Number(v) => write!(f, "Number({})", v),
            Value::Text(v) => {
                if v.chars().count() > 20 {
                    let head: String = v.chars().take(20).collect();
                    write!(f, "Text(\"{}...\")", head)
                } else {
                    write!(f, "Text(\"{}\")", v)
                }
            }
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Value::Number(v) => write!(f, "{}", v),
            Value::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl Value {
    /// Empty text value, the default content of an unset field
    pub fn empty() -> Self {
        Value::Text(String::new())
    }

    /// Whether the value renders as an empty string
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Text(s) => s.is_empty(),
            Value::Number(_) => false,
        }
    }
}

/// A single record: column identifier to scalar value
///
/// Field order is not carried by the record itself; the owning store's
/// column schema determines enumeration order. A record's identity is its
/// position in the store, so there is no id field here.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Column values
    values: HashMap<String, Value>,
}

impl Debug for Record {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "Record {{ {} fields }}", self.values.len())
    }
}

impl Default for Record {
    fn default() -> Self {
        Record::new()
    }
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Record {
            values: HashMap::new(),
        }
    }

    /// Create a record from column/value pairs
    pub fn from_pairs<I, C, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (C, V)>,
        C: Into<String>,
        V: Into<Value>,
    {
        Record {
            values: pairs
                .into_iter()
                .map(|(c, v)| (c.into(), v.into()))
                .collect(),
        }
    }

    /// Get a value by column identifier
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    /// Get a value by column identifier, rendering an unset field as empty text
    pub fn get_or_empty(&self, column: &str) -> Value {
        self.values.get(column).cloned().unwrap_or_else(Value::empty)
    }

    /// Set a value for a column, replacing any previous value
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(column.into(), value.into());
    }

    /// Number of fields with a value
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record holds no values at all
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
