//! Projection engine, reporting, and reconciliation for the capledger
//! equity ledger.
//!
//! This crate provides:
//! - [`Projection`] - derived holdings state, folded from the log
//! - [`apply`]/[`replay`] - the pure fold step and the batch replay
//! - Read-only aggregation queries (ownership table, class summaries)
//! - The reconciliation job that cross-checks incremental vs. batch state
//! - Reference-table registries for share classes and shareholders
//! - The [`Ledger`] facade tying store, rules, and projection together
//!
//! Core invariants:
//! - The transaction log is the system of record; the projection is a
//!   rebuildable cache and is never mutated in place
//! - Holdings are the signed sum of committed transactions per
//!   `(shareholder, share class)` key and never go negative
//! - Issued shares per class never exceed the authorized ceiling
//! - Replay is deterministic and idempotent

#![deny(missing_docs)]

/// Ledger error taxonomy.
pub mod errors;
/// Pure fold from transactions to holdings.
pub mod projection;
/// Full-replay drift detection.
pub mod reconcile;
/// Reference tables for share classes and shareholders.
pub mod registry;
/// Read-only aggregation queries.
pub mod reports;
/// The ledger facade.
pub mod service;

pub use errors::LedgerError;
pub use projection::{apply, replay, Projection, ProjectionError};
pub use reconcile::{reconcile, Drift, IntegrityError};
pub use registry::{RegistryError, ShareClassRegistry, ShareholderRegistry};
pub use reports::{holdings_for, ownership_table, share_class_summary, OwnershipRow, ShareClassSummary};
pub use service::Ledger;
