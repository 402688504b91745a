//! Append-only journal for committed equity transactions.
//!
//! A `.eqj` file is the ledger's source of truth: a short header followed
//! by frames, each frame carrying one committed transaction as JSON plus
//! the transaction's commit sequence in the frame head. Because the
//! sequence is part of the framing, the journal itself enforces the
//! commit-order discipline: writers refuse to append a sequence at or
//! below the file's high water mark, and readers refuse frames whose
//! sequences do not strictly increase or whose head disagrees with the
//! payload.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use capledger_journal::{JournalWriter, JournalReader, WriteOptions, ReadMode};
//! use serde_json::json;
//!
//! let tx = json!({
//!     "record_type": "equity_transaction",
//!     "record_version": "1",
//!     "shareholder_id": "holder:alice",
//!     "share_class_id": "class:common",
//!     "transaction_type": "issuance",
//!     "shares": 600000,
//!     "total_amount": "0",
//!     "occurred_at": "2025-01-15",
//!     "sequence": 1,
//!     "committed_at": "2025-01-15T10:00:00Z"
//! });
//!
//! let mut writer = JournalWriter::open("transactions.eqj", WriteOptions::default())?;
//! writer.append_transaction(&tx)?;
//! writer.finish()?;
//!
//! let mut reader = JournalReader::open("transactions.eqj", ReadMode::Strict)?;
//! while let Some(read_tx) = reader.read_transaction()? {
//!     println!("replaying sequence {}", read_tx["sequence"]);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(missing_docs)]

/// Error types for journal operations.
pub mod errors;
mod format;
/// Journal reader implementation.
pub mod reader;
/// Transaction JSON type alias and helpers.
pub mod record;
/// Verification helpers for stored transactions.
pub mod verification;
/// Journal writer implementation.
pub mod writer;

pub use errors::JournalError;
pub use reader::{JournalReader, ReadMode};
pub use record::{sequence_of, TxJson};
pub use verification::{verify_sequences, verify_tx_id};
pub use writer::{JournalWriter, WriteOptions};
