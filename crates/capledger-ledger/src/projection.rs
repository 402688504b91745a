//! Pure fold from transactions to holdings.
//!
//! The projection is derived state: `replay(log)` rebuilds it from scratch
//! and `apply` advances it one committed transaction at a time. Both paths
//! must agree: `replay(log) == log.fold(apply, empty)`, which the
//! reconciliation job checks in production and the tests check directly.

use std::collections::BTreeMap;

use capledger_core::{EquityTransaction, HoldingKey, SequenceToken, ShareClassId};
use capledger_store::TypedRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error raised while folding records into a projection.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// A record with an unrecognized transaction/record type reached the
    /// fold. Unreachable through validated writes; indicates a foreign or
    /// corrupted journal.
    #[error("unknown transaction type in record: {record_type}")]
    UnknownTransactionType {
        /// The offending record type tag.
        record_type: String,
    },
}

/// Derived holdings state, keyed by `(shareholder, share class)`.
///
/// Never persisted independently of the log and never mutated in place:
/// [`apply`] returns a new projection, so concurrent readers holding a
/// reference never observe a partially updated state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    holdings: BTreeMap<HoldingKey, i64>,
    issued_by_class: BTreeMap<ShareClassId, i64>,
    version: SequenceToken,
}

impl Projection {
    /// The empty projection: no holdings, version zero.
    pub fn empty() -> Self {
        Self {
            holdings: BTreeMap::new(),
            issued_by_class: BTreeMap::new(),
            version: SequenceToken::NONE,
        }
    }

    /// Signed share total for one key; zero if the key has no entry.
    pub fn holding(&self, key: &HoldingKey) -> i64 {
        self.holdings.get(key).copied().unwrap_or(0)
    }

    /// Issued shares across all shareholders for one class.
    pub fn issued_for_class(&self, class: &ShareClassId) -> i64 {
        self.issued_by_class.get(class).copied().unwrap_or(0)
    }

    /// Total issued shares across all classes.
    pub fn total_issued(&self) -> i64 {
        self.issued_by_class.values().sum()
    }

    /// All holdings, keyed by `(shareholder, share class)`.
    pub fn holdings(&self) -> &BTreeMap<HoldingKey, i64> {
        &self.holdings
    }

    /// Highest sequence folded into this projection.
    pub fn version(&self) -> SequenceToken {
        self.version
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::empty()
    }
}

/// A single pure fold step: `apply(projection, tx) -> projection'`.
///
/// Copy-on-write: the input projection is untouched. The sign mapping is
/// issuance/exercise `+shares`, repurchase/cancellation `-shares`.
pub fn apply(projection: &Projection, tx: &EquityTransaction) -> Projection {
    let mut next = projection.clone();
    let delta = tx.signed_shares();

    *next.holdings.entry(tx.key()).or_insert(0) += delta;
    *next
        .issued_by_class
        .entry(tx.share_class_id.clone())
        .or_insert(0) += delta;
    next.version = next.version.max(tx.sequence);

    next
}

/// Replays an ordered sequence of records into a projection:
/// `records.fold(apply, empty)`.
///
/// The empty log yields the empty projection. Replay has no side effects
/// and is idempotent: replaying the same records always yields the
/// identical projection.
///
/// # Errors
///
/// Returns [`ProjectionError::UnknownTransactionType`] if a record the
/// fold does not recognize is encountered (defensive; unreachable given
/// validated writes).
pub fn replay<I>(records: I) -> Result<Projection, ProjectionError>
where
    I: IntoIterator<Item = TypedRecord>,
{
    let mut projection = Projection::empty();
    for record in records {
        match record {
            TypedRecord::Equity(tx) => {
                projection = apply(&projection, &tx);
            }
            TypedRecord::Unknown(json) => {
                let record_type = json
                    .get("record_type")
                    .and_then(|v| v.as_str())
                    .unwrap_or("<missing>")
                    .to_string();
                return Err(ProjectionError::UnknownTransactionType { record_type });
            }
        }
    }
    Ok(projection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use capledger_core::{
        Digest, DigestAlg, ShareClassId, ShareholderId, TransactionType, EQUITY_RECORD_TYPE,
        RECORD_VERSION,
    };
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;
    use serde_json::json;

    fn tx(
        holder: &str,
        class: &str,
        tx_type: TransactionType,
        shares: u64,
        sequence: u64,
    ) -> EquityTransaction {
        EquityTransaction {
            tx_id: Digest::new(DigestAlg::Sha256, "A".repeat(43)).unwrap(),
            record_type: EQUITY_RECORD_TYPE.to_string(),
            record_version: RECORD_VERSION.to_string(),
            shareholder_id: ShareholderId::parse(holder).unwrap(),
            share_class_id: ShareClassId::parse(class).unwrap(),
            transaction_type: tx_type,
            shares,
            total_amount: Decimal::ZERO,
            occurred_at: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            sequence: SequenceToken(sequence),
            committed_at: Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn empty_replay_yields_empty_projection() {
        let projection = replay(Vec::new()).unwrap();
        assert_eq!(projection, Projection::empty());
        assert_eq!(projection.total_issued(), 0);
    }

    #[test]
    fn apply_is_copy_on_write() {
        let base = Projection::empty();
        let next = apply(&base, &tx("holder:a", "class:c", TransactionType::Issuance, 100, 1));

        assert_eq!(base, Projection::empty());
        assert_eq!(
            next.holding(&(
                ShareholderId::parse("holder:a").unwrap(),
                ShareClassId::parse("class:c").unwrap()
            )),
            100
        );
    }

    #[test]
    fn sign_mapping_flows_through_apply() {
        let txs = vec![
            tx("holder:a", "class:c", TransactionType::Issuance, 100, 1),
            tx("holder:a", "class:c", TransactionType::Exercise, 50, 2),
            tx("holder:a", "class:c", TransactionType::Repurchase, 30, 3),
            tx("holder:a", "class:c", TransactionType::Cancellation, 20, 4),
        ];
        let projection = txs.iter().fold(Projection::empty(), |p, t| apply(&p, t));

        let key = (
            ShareholderId::parse("holder:a").unwrap(),
            ShareClassId::parse("class:c").unwrap(),
        );
        assert_eq!(projection.holding(&key), 100);
        assert_eq!(
            projection.issued_for_class(&ShareClassId::parse("class:c").unwrap()),
            100
        );
        assert_eq!(projection.version(), SequenceToken(4));
    }

    #[test]
    fn replay_equals_fold_of_apply() {
        let txs = vec![
            tx("holder:a", "class:c", TransactionType::Issuance, 100, 1),
            tx("holder:b", "class:c", TransactionType::Issuance, 60, 2),
            tx("holder:a", "class:c", TransactionType::Repurchase, 40, 3),
        ];

        let folded = txs.iter().fold(Projection::empty(), |p, t| apply(&p, t));
        let replayed = replay(txs.into_iter().map(TypedRecord::Equity)).unwrap();
        assert_eq!(folded, replayed);
    }

    #[test]
    fn replay_is_deterministic_and_idempotent() {
        let txs: Vec<_> = (1..=10)
            .map(|s| tx("holder:a", "class:c", TransactionType::Issuance, s, s))
            .collect();

        let first = replay(txs.iter().cloned().map(TypedRecord::Equity)).unwrap();
        let second = replay(txs.iter().cloned().map(TypedRecord::Equity)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn apply_commutes_across_distinct_keys() {
        let t1 = tx("holder:a", "class:c", TransactionType::Issuance, 100_000, 1);
        let t2 = tx("holder:b", "class:c", TransactionType::Issuance, 50_000, 2);

        let p = Projection::empty();
        let ab = apply(&apply(&p, &t1), &t2);
        let ba = apply(&apply(&p, &t2), &t1);

        assert_eq!(ab.holdings(), ba.holdings());
        assert_eq!(ab.total_issued(), ba.total_issued());
    }

    #[test]
    fn unknown_record_type_is_an_error() {
        let records = vec![TypedRecord::Unknown(json!({"record_type": "stock_split"}))];
        let err = replay(records).unwrap_err();
        assert!(matches!(
            err,
            ProjectionError::UnknownTransactionType { ref record_type } if record_type == "stock_split"
        ));
    }
}
