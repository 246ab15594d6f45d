//! Byte-Tree Bridge: JSON bytes ⇄ [`Value`], backed by `serde_json`.
//!
//! The engines only ever see trees; this module is the single place where
//! bytes are parsed or produced. Object keys keep their document order.

use crate::error::Result;
use crate::value::Value;

/// Parse a JSON document into a tree.
pub fn parse(bytes: &[u8]) -> Result<Value> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Serialize a tree as compact JSON (`{"a":1}`).
pub fn serialize(value: &Value) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

/// Serialize a tree as indented JSON.
pub fn serialize_pretty(value: &Value) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(value)?)
}
