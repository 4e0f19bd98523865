//! Row identifiers.
//!
//! Hosts key selectable items by a stable id: a natural string id where the
//! data has one, or the item's positional index otherwise. The host computes
//! that fallback (`id = item.id, else index`) once per render pass; this
//! module only defines the identifier type and the untyped boundary through
//! which controlled props arrive.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SelectionError;

/// Identifier for a selectable row or item.
///
/// Ids are either text or a non-negative number. Serialization is untagged,
/// so JSON strings and numbers map directly onto the two variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    /// Positional or numeric identifier.
    Index(u64),
    /// Natural string identifier.
    Text(String),
}

impl RowId {
    /// Parse a single id from a JSON value.
    ///
    /// Accepts a string or a non-negative integer.
    pub fn from_value(value: &Value) -> Result<Self, SelectionError> {
        match value {
            Value::String(s) => Ok(Self::Text(s.clone())),
            Value::Number(n) => n.as_u64().map(Self::Index).ok_or_else(|| {
                SelectionError::InvalidArgument(format!(
                    "row id must be a string or a non-negative integer, got {n}"
                ))
            }),
            other => Err(SelectionError::InvalidArgument(format!(
                "row id must be a string or a non-negative integer, got {}",
                json_kind(other)
            ))),
        }
    }
}

impl From<u64> for RowId {
    fn from(index: u64) -> Self {
        Self::Index(index)
    }
}

impl From<usize> for RowId {
    fn from(index: usize) -> Self {
        Self::Index(index as u64)
    }
}

impl From<&str> for RowId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for RowId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Parse an id collection from a JSON value.
///
/// Rejects anything that is not an array of string/number ids. No partial
/// result is produced: the first invalid element fails the whole parse.
pub fn ids_from_value(value: &Value) -> Result<Vec<RowId>, SelectionError> {
    let Value::Array(items) = value else {
        return Err(SelectionError::InvalidArgument(format!(
            "expected an array of row ids, got {}",
            json_kind(value)
        )));
    };
    items.iter().map(RowId::from_value).collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
