//! Error taxonomy for ledger operations.

use capledger_core::{RuleViolation, ShareClassId, ValidationError};
use capledger_store::StoreError;
use thiserror::Error;

use crate::projection::ProjectionError;
use crate::reconcile::IntegrityError;
use crate::registry::RegistryError;

/// Errors surfaced by the [`crate::Ledger`] facade.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A referenced share class or shareholder does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// What kind of record was looked up ("share class", "shareholder").
        kind: &'static str,
        /// The identifier that missed.
        id: String,
    },
    /// The candidate transaction broke a consistency rule. Nothing was
    /// written.
    #[error(transparent)]
    Validation(#[from] RuleViolation),
    /// The affected key advanced between validation and commit. Safe to
    /// retry after a fresh read.
    #[error(transparent)]
    Conflict(StoreError),
    /// Amending a class's authorized ceiling below its issued total.
    #[error("cannot set authorized shares for {class} to {requested}: {issued} already issued")]
    AuthorizedBelowIssued {
        /// Share class being amended.
        class: ShareClassId,
        /// Requested new ceiling.
        requested: u64,
        /// Shares currently issued for the class.
        issued: i64,
    },
    /// A supplied identifier or field failed validation.
    #[error(transparent)]
    InvalidIdentifier(#[from] ValidationError),
    /// Reconciliation found projection drift.
    #[error(transparent)]
    Integrity(#[from] IntegrityError),
    /// Replay hit a record the projection cannot fold.
    #[error(transparent)]
    Projection(#[from] ProjectionError),
    /// Reference-table storage failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// Transaction store failure other than a concurrency conflict.
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        if err.is_conflict() {
            LedgerError::Conflict(err)
        } else {
            LedgerError::Store(err)
        }
    }
}

impl LedgerError {
    /// Returns true if the operation can be retried after re-reading state.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LedgerError::Conflict(_))
    }
}
