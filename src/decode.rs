//! Decoding collaborator - turn JSON text into a value tree
//!
//! The extractor itself never parses; it consumes trees produced here (or
//! by any other serde-compatible decoder). `decode_str` covers text that
//! is already a `&str`; `decode_bytes` runs simd-json over a mutable byte
//! buffer, which is the faster route for whole-file payloads.

use serde_json::Value;
use thiserror::Error;

/// A malformed document. Fatal to the pass; there is no partial tree.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed JSON text: {0}")]
    Text(#[from] serde_json::Error),

    #[error("malformed JSON buffer: {0}")]
    Bytes(#[from] simd_json::Error),
}

/// Decode a JSON document from text.
pub fn decode_str(text: &str) -> Result<Value, DecodeError> {
    Ok(serde_json::from_str(text)?)
}

/// Decode a JSON document from a byte buffer.
///
/// simd-json parses in place, so the buffer is scratch space afterwards.
pub fn decode_bytes(bytes: &mut [u8]) -> Result<Value, DecodeError> {
    Ok(simd_json::serde::from_slice(bytes)?)
}
