//! Error types for store operations.

use capledger_core::{HoldingKey, SequenceToken};
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Journal backend error.
    #[error("journal error: {0}")]
    Journal(#[from] capledger_journal::JournalError),
    /// Parse error during transaction parsing.
    #[error("parse error: {0}")]
    Parse(#[from] crate::typed::ParseError),
    /// Optimistic concurrency conflict: the key advanced past the version
    /// the caller validated against. Safe to retry after a fresh read.
    #[error(
        "concurrency conflict on ({holder}, {class}): expected sequence {expected}, found {actual}"
    )]
    Conflict {
        /// Shareholder side of the affected key.
        holder: capledger_core::ShareholderId,
        /// Share class side of the affected key.
        class: capledger_core::ShareClassId,
        /// Sequence the caller validated against.
        expected: SequenceToken,
        /// Latest committed sequence for the key.
        actual: SequenceToken,
    },
    /// Transaction ID computation failed while committing.
    #[error("tx ID computation failed: {0}")]
    TxId(#[from] capledger_core::TxIdError),
    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl StoreError {
    /// Builds a [`StoreError::Conflict`] for the given key and versions.
    pub fn conflict(key: HoldingKey, expected: SequenceToken, actual: SequenceToken) -> Self {
        StoreError::Conflict {
            holder: key.0,
            class: key.1,
            expected,
            actual,
        }
    }

    /// Returns true if this is a retryable concurrency conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }
}
