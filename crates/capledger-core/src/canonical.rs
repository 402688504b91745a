//! Canonicalization helpers for deterministic hashing.
//!
//! Transaction IDs must be reproducible from stored JSON alone, so the
//! bytes fed to the hash are produced by a canonical JSON encoding with
//! all numbers rendered as strings (floating-point encodings never reach
//! the hasher).

use serde_json::Value;

/// Error returned when canonicalization fails.
#[derive(thiserror::Error, Debug)]
pub enum CanonicalizationError {
    /// Provided JSON could not be canonicalized.
    #[error("invalid JSON structure: {0}")]
    InvalidStructure(String),
    /// Non-finite number (NaN/Infinity) detected.
    #[error("non-finite number detected")]
    NonFiniteNumber,
}

/// Produces canonical UTF-8 bytes for a JSON value.
///
/// Object members are emitted in sorted key order and every JSON number is
/// converted to its string form before encoding, so two serializations of
/// the same record hash identically.
pub fn canonical_bytes(value: &Value) -> Result<Vec<u8>, CanonicalizationError> {
    let mut value = value.clone();
    stringify_numbers(&mut value)?;
    let canonical = canonical_json::to_string(&value)
        .map_err(|e| CanonicalizationError::InvalidStructure(format!("{:?}", e)))?;
    Ok(canonical.into_bytes())
}

/// Recursively converts all JSON numbers into strings.
fn stringify_numbers(value: &mut Value) -> Result<(), CanonicalizationError> {
    match value {
        Value::Number(n) => {
            if let Some(f) = n.as_f64() {
                if !f.is_finite() {
                    return Err(CanonicalizationError::NonFiniteNumber);
                }
            }
            let s = n.to_string();
            *value = Value::String(s);
        }
        Value::Array(arr) => {
            for v in arr {
                stringify_numbers(v)?;
            }
        }
        Value::Object(map) => {
            for v in map.values_mut() {
                stringify_numbers(v)?;
            }
        }
        _ => {}
    }
    Ok(())
}
