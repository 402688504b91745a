//! Storage backend traits.

use crate::error::StoreError;
use crate::TxJson;

/// Trait for appending transactions to a store backend.
pub trait StoreWriter {
    /// Appends a transaction JSON payload to the store.
    fn append(&mut self, tx: &TxJson) -> Result<(), StoreError>;
}

/// Trait for reading transactions sequentially from a store backend.
pub trait StoreReader {
    /// Reads the next transaction, or `Ok(None)` at end of stream.
    fn read_next(&mut self) -> Result<Option<TxJson>, StoreError>;
}
