//! Pluggable storage backend abstraction for capledger transactions.
//!
//! This crate provides:
//! - `StoreWriter` and `StoreReader` traits for append-only transaction storage
//! - Default journal-backed implementation using `capledger-journal`
//! - Transaction filtering API for selective iteration
//! - Typed transaction parsing
//! - The sequenced [`TransactionLog`] with per-key optimistic concurrency
//!
//! The journal backend is the reference implementation; any durable,
//! sequenced store satisfies the contract.

#![deny(missing_docs)]

/// Error types for store operations.
pub mod error;
/// Transaction filtering API.
pub mod filter;
/// Journal-backed storage implementation.
pub mod journal;
/// The sequenced transaction log.
pub mod log;
/// Storage backend traits.
pub mod traits;
/// Typed transaction parsing.
pub mod typed;

pub use capledger_journal::{ReadMode, TxJson, WriteOptions};
pub use error::StoreError;
pub use filter::{
    AndFilter, DateRangeFilter, FilteredReader, OrFilter, ShareClassFilter, ShareholderFilter,
    TransactionTypeFilter, TxFilter,
};
pub use journal::{JournalBackendReader, JournalBackendWriter};
pub use log::TransactionLog;
pub use traits::{StoreReader, StoreWriter};
pub use typed::{parse_transaction, ParseError, TypedRecord};
