use serde_json::Value;

/// A committed equity transaction as stored on disk.
///
/// The journal stores transactions as JSON objects and leaves typed
/// parsing to `capledger-store`. The one field the journal itself reads is
/// `sequence`, the strictly increasing commit number that frames and
/// payloads must agree on.
pub type TxJson = Value;

/// Extracts the commit sequence embedded in a transaction payload.
pub fn sequence_of(tx: &TxJson) -> Option<u64> {
    tx.get("sequence")?.as_u64()
}
