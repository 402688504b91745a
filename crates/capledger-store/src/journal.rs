//! Journal-backed storage implementation.

use crate::error::StoreError;
use crate::traits::{StoreReader, StoreWriter};
use crate::TxJson;
use capledger_journal::{JournalReader, JournalWriter, ReadMode, WriteOptions};
use std::path::Path;

/// Store writer backed by a `capledger-journal` file.
pub struct JournalBackendWriter {
    writer: JournalWriter,
}

impl JournalBackendWriter {
    /// Opens or creates a journal file for appending.
    pub fn open<P: AsRef<Path>>(path: P, options: WriteOptions) -> Result<Self, StoreError> {
        let writer = JournalWriter::open(path, options)?;
        Ok(Self { writer })
    }

    /// Finishes writing and closes the file.
    pub fn finish(self) -> Result<(), StoreError> {
        self.writer.finish()?;
        Ok(())
    }
}

impl StoreWriter for JournalBackendWriter {
    fn append(&mut self, tx: &TxJson) -> Result<(), StoreError> {
        self.writer.append_transaction(tx)?;
        Ok(())
    }
}

/// Store reader backed by a `capledger-journal` file.
pub struct JournalBackendReader {
    reader: JournalReader,
}

impl JournalBackendReader {
    /// Opens a journal file for reading.
    pub fn open<P: AsRef<Path>>(path: P, mode: ReadMode) -> Result<Self, StoreError> {
        let reader = JournalReader::open(path, mode)?;
        Ok(Self { reader })
    }
}

impl StoreReader for JournalBackendReader {
    fn read_next(&mut self) -> Result<Option<TxJson>, StoreError> {
        let tx = self.reader.read_transaction()?;
        Ok(tx)
    }
}
