//! Transaction ID computation with domain-separated hashing.
//!
//! Transaction IDs are computed as: `sha256(domain_separator || canonical_bytes(tx))`
//! where the tx_id field is excluded from the hash input.

use crate::canonical::canonical_bytes;
use crate::{Digest, DigestAlg};
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest as Sha2Digest, Sha256};

/// Domain separator for transaction ID computation: `b"capledger:tx:v1\0"`.
const TX_DOMAIN_SEPARATOR: &[u8] = b"capledger:tx:v1\0";

/// Error during transaction ID computation.
#[derive(thiserror::Error, Debug)]
pub enum TxIdError {
    /// Serialization failed.
    #[error("serialization failed: {0}")]
    Serialization(String),
    /// Canonicalization failed.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] crate::CanonicalizationError),
    /// Digest construction failed.
    #[error("digest construction failed: {0}")]
    Digest(#[from] crate::ValidationError),
}

/// Computes the content-derived ID for an equity transaction.
///
/// Formula: `sha256(domain_separator || canonical_bytes(tx))`
///
/// The transaction must be serializable and is canonicalized before
/// hashing. The `tx_id` field (if present) is excluded from the hash input
/// to avoid self-referential hashing.
///
/// # Errors
///
/// Returns [`TxIdError`] if serialization or canonicalization fails.
pub fn compute_tx_id<T: Serialize>(tx: &T) -> Result<Digest, TxIdError> {
    let mut value: Value =
        serde_json::to_value(tx).map_err(|e| TxIdError::Serialization(e.to_string()))?;

    if let Value::Object(map) = &mut value {
        map.remove("tx_id");
    }

    let bytes = canonical_bytes(&value)?;

    let mut hasher = Sha256::new();
    hasher.update(TX_DOMAIN_SEPARATOR);
    hasher.update(&bytes);
    let hash_bytes = hasher.finalize();

    use base64::Engine;
    let b64 = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(hash_bytes);
    Ok(Digest::new(DigestAlg::Sha256, b64)?)
}

/// Verifies that a claimed tx_id matches the computed tx_id.
///
/// Returns `true` if the claimed ID matches the computed ID, `false` otherwise.
///
/// # Errors
///
/// Returns [`TxIdError`] if computation fails.
pub fn verify_tx_id<T: Serialize>(tx: &T, claimed_id: &Digest) -> Result<bool, TxIdError> {
    let computed_id = compute_tx_id(tx)?;
    Ok(claimed_id == &computed_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn id_is_deterministic() {
        let tx = json!({
            "record_type": "equity_transaction",
            "shareholder_id": "holder:alice",
            "share_class_id": "class:common",
            "transaction_type": "issuance",
            "shares": 600000,
            "occurred_at": "2025-01-15"
        });
        let a = compute_tx_id(&tx).unwrap();
        let b = compute_tx_id(&tx).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn tx_id_field_is_excluded_from_hash() {
        let without = json!({"record_type": "equity_transaction", "shares": 1});
        let mut with = without.clone();
        with["tx_id"] = serde_json::to_value(compute_tx_id(&without).unwrap()).unwrap();
        assert_eq!(
            compute_tx_id(&without).unwrap(),
            compute_tx_id(&with).unwrap()
        );
    }

    #[test]
    fn verify_detects_tampering() {
        let tx = json!({"record_type": "equity_transaction", "shares": 100});
        let id = compute_tx_id(&tx).unwrap();
        assert!(verify_tx_id(&tx, &id).unwrap());

        let tampered = json!({"record_type": "equity_transaction", "shares": 101});
        assert!(!verify_tx_id(&tampered, &id).unwrap());
    }
}
