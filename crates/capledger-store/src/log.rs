//! The sequenced transaction log: the single source of truth.
//!
//! [`TransactionLog`] wraps the journal backend with commit semantics:
//! strictly increasing sequence assignment, content-derived transaction
//! IDs, and per-key optimistic concurrency. Committed transactions are
//! immutable; corrections are new offsetting transactions.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use capledger_core::{
    compute_tx_id, EquityTransaction, HoldingKey, SequenceToken, TransactionDraft,
    EQUITY_RECORD_TYPE, RECORD_VERSION,
};
use capledger_journal::{JournalReader, JournalWriter, ReadMode, WriteOptions};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::StoreError;
use crate::filter::TxFilter;
use crate::typed::{parse_transaction, ParseError, TypedRecord};

/// Append-only log of committed equity transactions.
///
/// The log loads the backing journal at open time and keeps the writer
/// open for appends. It maintains the latest committed sequence per
/// `(shareholder, share class)` key; an append must carry the sequence the
/// caller validated against, and is rejected with
/// [`StoreError::Conflict`] if the key has advanced since. This is what
/// stops two concurrent admins from jointly issuing past the authorized
/// cap.
pub struct TransactionLog {
    path: PathBuf,
    writer: JournalWriter,
    transactions: Vec<EquityTransaction>,
    last_sequence: SequenceToken,
    last_sequence_by_key: HashMap<HoldingKey, SequenceToken>,
}

impl TransactionLog {
    /// Opens a transaction log backed by the journal file at `path`,
    /// creating it if absent.
    ///
    /// Existing transactions are loaded in strict mode: a torn frame or
    /// broken sequence order fails at the journal layer, and a foreign
    /// record type is an error here, not something to skip over.
    pub fn open<P: AsRef<Path>>(path: P, options: WriteOptions) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let mut transactions = Vec::new();
        let mut last_sequence = SequenceToken::NONE;
        let mut last_sequence_by_key: HashMap<HoldingKey, SequenceToken> = HashMap::new();

        if path.exists() {
            let mut reader = JournalReader::open(&path, ReadMode::Strict)?;
            while let Some(tx_json) = reader.read_transaction()? {
                let tx = match parse_transaction(&tx_json)? {
                    TypedRecord::Equity(tx) => tx,
                    TypedRecord::Unknown(json) => {
                        return Err(StoreError::Other(format!(
                            "unknown record type in journal: {}",
                            json.get("record_type").unwrap_or(&Value::Null)
                        )));
                    }
                };
                last_sequence = tx.sequence;
                last_sequence_by_key.insert(tx.key(), tx.sequence);
                transactions.push(tx);
            }
        }

        let writer = JournalWriter::open(&path, options)?;

        debug!(
            path = %path.display(),
            transactions = transactions.len(),
            version = %last_sequence,
            "transaction log opened"
        );

        Ok(Self {
            path,
            writer,
            transactions,
            last_sequence,
            last_sequence_by_key,
        })
    }

    /// Path of the backing journal file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Latest committed sequence across all keys (the log version).
    pub fn version(&self) -> SequenceToken {
        self.last_sequence
    }

    /// Latest committed sequence for one `(shareholder, share class)` key,
    /// or [`SequenceToken::NONE`] if the key has no transactions.
    pub fn latest_sequence(&self, key: &HoldingKey) -> SequenceToken {
        self.last_sequence_by_key
            .get(key)
            .copied()
            .unwrap_or(SequenceToken::NONE)
    }

    /// Appends a validated draft, enforcing the optimistic-concurrency
    /// token.
    ///
    /// `expected` must be the latest sequence the caller observed for the
    /// draft's key when it validated the transaction
    /// ([`SequenceToken::NONE`] for a fresh key). If the key has advanced,
    /// the append is rejected with [`StoreError::Conflict`] and nothing is
    /// written; the caller should re-read and retry.
    ///
    /// On success the transaction is assigned the next strictly increasing
    /// sequence, the commit timestamp, and its content-derived `tx_id`,
    /// and becomes visible to all subsequent reads.
    pub fn append(
        &mut self,
        draft: &TransactionDraft,
        expected: SequenceToken,
    ) -> Result<EquityTransaction, StoreError> {
        let key = (draft.shareholder_id.clone(), draft.share_class_id.clone());
        let actual = self.latest_sequence(&key);
        if actual != expected {
            return Err(StoreError::conflict(key, expected, actual));
        }

        let sequence = self.last_sequence.next();
        let committed_at = Utc::now();

        let mut value = serde_json::to_value(draft).map_err(ParseError::from)?;
        let obj = value
            .as_object_mut()
            .ok_or_else(|| StoreError::Other("draft did not serialize to an object".into()))?;
        obj.insert("record_type".into(), json!(EQUITY_RECORD_TYPE));
        obj.insert("record_version".into(), json!(RECORD_VERSION));
        obj.insert("sequence".into(), json!(sequence.0));
        obj.insert(
            "committed_at".into(),
            serde_json::to_value(committed_at).map_err(ParseError::from)?,
        );

        let tx_id = compute_tx_id(&value)?;
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "tx_id".into(),
                serde_json::to_value(&tx_id).map_err(ParseError::from)?,
            );
        }

        self.writer.append_transaction(&value)?;

        let tx: EquityTransaction =
            serde_json::from_value(value).map_err(ParseError::from)?;

        self.last_sequence = sequence;
        self.last_sequence_by_key.insert(tx.key(), sequence);
        self.transactions.push(tx.clone());

        debug!(
            sequence = %sequence,
            shareholder = %tx.shareholder_id,
            class = %tx.share_class_id,
            tx_type = tx.transaction_type.as_str(),
            shares = tx.shares,
            "transaction committed"
        );

        Ok(tx)
    }

    /// Lists committed transactions in canonical replay order:
    /// `(occurred_at, sequence)` ascending. The order is total because
    /// sequences are unique.
    ///
    /// An optional filter restricts the result; `None` lists everything.
    pub fn list(&self, filter: Option<&dyn TxFilter>) -> Result<Vec<EquityTransaction>, StoreError> {
        let mut result = Vec::with_capacity(self.transactions.len());
        for tx in &self.transactions {
            if let Some(f) = filter {
                let json = serde_json::to_value(tx).map_err(ParseError::from)?;
                if !f.matches(&json) {
                    continue;
                }
            }
            result.push(tx.clone());
        }
        result.sort_by(|a, b| {
            (a.occurred_at, a.sequence).cmp(&(b.occurred_at, b.sequence))
        });
        Ok(result)
    }

    /// Number of committed transactions.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the log holds no transactions.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
