//! Object value encoding.
//!
//! Objects are stored as canonical UTF-8 JSON; buffers bypass this module
//! entirely and hit the disk as raw bytes.

use serde_json::Value;

use crate::error::StoreResult;

/// Encode a structured value for storage.
pub fn encode_object(value: &Value) -> StoreResult<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

/// Decode a stored payload back to a structured value.
///
/// Fails with `StoreError::Decode` — distinct from an I/O failure — when the
/// payload is not valid JSON.
pub fn decode_object(bytes: &[u8]) -> StoreResult<Value> {
    Ok(serde_json::from_slice(bytes)?)
}
