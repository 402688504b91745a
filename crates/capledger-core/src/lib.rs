//! Canonical data model primitives for the capledger equity ledger.
//!
//! Every field that participates in hashing, storage, or validation lives
//! in this crate:
//! - Validated identifier newtypes for share classes, shareholders, entities
//! - Digest primitives and content-derived transaction IDs
//! - Record types: share classes, shareholders, equity transactions
//! - The pure consistency rules applied before a transaction is accepted
//!
#![deny(missing_docs)]

/// Canonicalization helpers for deterministic hashing.
pub mod canonical;
/// Digest/identifier primitives.
pub mod digest;
/// Core identifiers and newtypes.
pub mod identifiers;
/// Record types for reference tables and the transaction log.
pub mod records;
/// Consistency rules checked before a transaction is committed.
pub mod rules;
/// Transaction ID computation with domain-separated hashing.
pub mod tx_id;
/// Validation helpers used by canonical types.
pub mod validation;

pub use canonical::{canonical_bytes, CanonicalizationError};
pub use digest::{Digest, DigestAlg};
pub use identifiers::{EntityId, ShareClassId, ShareholderId};
pub use records::{
    ClassType, EquityTransaction, HoldingKey, SequenceToken, ShareClass, Shareholder,
    ShareholderType, TransactionDraft, TransactionType, EQUITY_RECORD_TYPE, RECORD_VERSION,
};
pub use rules::{validate, RuleViolation};
pub use tx_id::{compute_tx_id, verify_tx_id, TxIdError};
pub use validation::ValidationError;
