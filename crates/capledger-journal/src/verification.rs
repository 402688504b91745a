//! Integrity checks over stored transactions.
//!
//! The reader already enforces framing and sequence order while loading;
//! these helpers let audit tooling re-check transactions it has in hand,
//! most importantly recomputing the content-derived `tx_id` to detect
//! edits made behind the ledger's back.

use crate::errors::JournalError;
use crate::record::{self, TxJson};
use capledger_core::compute_tx_id;

/// Verifies a stored transaction against its claimed `tx_id`.
///
/// Recomputes the content digest from the JSON as stored and compares it
/// to the embedded `tx_id`. `Ok(false)` means the content was altered
/// after commit.
pub fn verify_tx_id(tx: &TxJson) -> Result<bool, JournalError> {
    let claimed = tx
        .get("tx_id")
        .and_then(|v| serde_json::from_value::<capledger_core::Digest>(v.clone()).ok())
        .ok_or_else(|| JournalError::Unverifiable("missing or invalid tx_id".to_string()))?;

    let computed = compute_tx_id(tx)
        .map_err(|e| JournalError::Unverifiable(format!("tx ID computation failed: {e}")))?;

    Ok(claimed == computed)
}

/// Verifies that a stream of transactions carries strictly increasing
/// commit sequences.
///
/// A duplicate or out-of-order sequence means the stream was not produced
/// by a single well-behaved writer.
pub fn verify_sequences<'a, I>(transactions: I) -> Result<(), JournalError>
where
    I: IntoIterator<Item = &'a TxJson>,
{
    let mut previous: u64 = 0;
    for tx in transactions {
        let found = record::sequence_of(tx).ok_or(JournalError::MissingSequence)?;
        if found <= previous {
            return Err(JournalError::NonMonotonicSequence { found, previous });
        }
        previous = found;
    }
    Ok(())
}
