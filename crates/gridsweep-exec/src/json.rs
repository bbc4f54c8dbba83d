//! Canonical JSON encoding and content hashes of sweep results.
//!
//! Values pass through [`serde_json::Value`] before they are written.
//! Without the `preserve_order` feature its object map is a `BTreeMap`, so
//! every object, `HashMap`-backed ones included, comes out with sorted keys
//! and equal results always encode to equal bytes.

use gridsweep_core::{ErrorInfo, GridError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};

fn encode_error(err: serde_json::Error) -> GridError {
    GridError::Serde(ErrorInfo::new("json-encode", err.to_string()))
}

/// Compact JSON with object keys in sorted order.
pub fn to_canonical_json_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, GridError> {
    let value = serde_json::to_value(value).map_err(encode_error)?;
    serde_json::to_vec(&value).map_err(encode_error)
}

/// Decodes JSON produced by [`to_canonical_json_bytes`] (or any other JSON).
pub fn from_json_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, GridError> {
    serde_json::from_slice(data).map_err(|err| {
        GridError::Serde(
            ErrorInfo::new("json-decode", err.to_string())
                .with_context("line", err.line())
                .with_context("column", err.column()),
        )
    })
}

/// Lowercase hex SHA-256 of the canonical JSON form of `value`.
pub fn stable_hash_string<T: Serialize + ?Sized>(value: &T) -> Result<String, GridError> {
    let digest = Sha256::digest(to_canonical_json_bytes(value)?);
    Ok(digest.iter().map(|byte| format!("{byte:02x}")).collect())
}
