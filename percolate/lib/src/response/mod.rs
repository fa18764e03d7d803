//! Response helpers.
//!
//! The client returns every response as a raw [`serde_json::Value`]. List
//! endpoints answer with an envelope of the shape
//! `{ "data": [...], "pagination": {...} }`; the helpers here give callers a
//! typed view of that envelope without the client projecting it for them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DecodeError;

/// A decoded list response.
///
/// ## Examples
///
/// ```rust
/// use percolate::response::Envelope;
/// use serde_json::json;
///
/// let body = json!({"data": [{"id": 1}], "pagination": {"total": 1}});
/// let envelope = Envelope::from_value(body).unwrap();
///
/// assert_eq!(envelope.data.len(), 1);
/// assert_eq!(envelope.total(), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// The page of records.
    pub data: Vec<Value>,
    /// Pagination metadata, passed through untouched.
    #[serde(default)]
    pub pagination: Value,
}

impl Envelope {
    /// Reads an envelope out of a decoded response.
    ///
    /// ## Errors
    ///
    /// Returns [`DecodeError::NotAnEnvelope`] if `data` is missing or is not
    /// an array.
    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        serde_json::from_value(value).map_err(DecodeError::NotAnEnvelope)
    }

    /// The `total` reported in the pagination block, if present.
    pub fn total(&self) -> Option<u64> {
        self.pagination.get("total").and_then(Value::as_u64)
    }
}

/// Extracts the `data` array of an envelope, discarding pagination.
///
/// ## Errors
///
/// Returns [`DecodeError::NotAnEnvelope`] if the value has no `data` array.
pub fn take_data(value: Value) -> Result<Vec<Value>, DecodeError> {
    Envelope::from_value(value).map(|envelope| envelope.data)
}
