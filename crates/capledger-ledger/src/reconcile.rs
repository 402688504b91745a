//! Full-replay drift detection.
//!
//! The reconciliation job rebuilds the projection from scratch and diffs
//! it key-by-key against the incrementally maintained one. Drift means a
//! bug in the incremental path or store ordering; it is surfaced, never
//! auto-repaired.

use capledger_core::HoldingKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::error;

use crate::projection::Projection;

/// One key where the incremental and replayed projections disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drift {
    /// The offending `(shareholder, share class)` key.
    pub key: HoldingKey,
    /// Holding according to the incrementally maintained projection.
    pub incremental: i64,
    /// Holding according to the from-scratch replay.
    pub replayed: i64,
}

/// Projection drift detected by reconciliation.
///
/// Indicates a defect; logged and alerted on, not shown to end users and
/// never auto-corrected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("projection drift on {} key(s)", drifts.len())]
pub struct IntegrityError {
    /// Every key that disagreed, with both values.
    pub drifts: Vec<Drift>,
}

/// Diffs the incremental projection against a from-scratch replay.
///
/// Keys present in either projection are compared, with a missing entry
/// counting as zero. Returns `Ok(())` when the projections agree on every
/// key.
pub fn reconcile(incremental: &Projection, replayed: &Projection) -> Result<(), IntegrityError> {
    let keys: BTreeSet<&HoldingKey> = incremental
        .holdings()
        .keys()
        .chain(replayed.holdings().keys())
        .collect();

    let mut drifts = Vec::new();
    for key in keys {
        let inc = incremental.holding(key);
        let rep = replayed.holding(key);
        if inc != rep {
            error!(
                shareholder = %key.0,
                class = %key.1,
                incremental = inc,
                replayed = rep,
                "projection drift detected"
            );
            drifts.push(Drift {
                key: key.clone(),
                incremental: inc,
                replayed: rep,
            });
        }
    }

    if drifts.is_empty() {
        Ok(())
    } else {
        Err(IntegrityError { drifts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::apply;
    use capledger_core::{
        Digest, DigestAlg, EquityTransaction, SequenceToken, ShareClassId, ShareholderId,
        TransactionType, EQUITY_RECORD_TYPE, RECORD_VERSION,
    };
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;

    fn tx(holder: &str, shares: u64, seq: u64) -> EquityTransaction {
        EquityTransaction {
            tx_id: Digest::new(DigestAlg::Sha256, "A".repeat(43)).unwrap(),
            record_type: EQUITY_RECORD_TYPE.to_string(),
            record_version: RECORD_VERSION.to_string(),
            shareholder_id: ShareholderId::parse(holder).unwrap(),
            share_class_id: ShareClassId::parse("class:common").unwrap(),
            transaction_type: TransactionType::Issuance,
            shares,
            total_amount: Decimal::ZERO,
            occurred_at: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            sequence: SequenceToken(seq),
            committed_at: Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn agreeing_projections_reconcile() {
        let p = apply(&Projection::empty(), &tx("holder:a", 100, 1));
        assert!(reconcile(&p, &p.clone()).is_ok());
    }

    #[test]
    fn drift_is_reported_with_both_values() {
        let incremental = apply(&Projection::empty(), &tx("holder:a", 100, 1));
        let replayed = apply(&Projection::empty(), &tx("holder:a", 90, 1));

        let err = reconcile(&incremental, &replayed).unwrap_err();
        assert_eq!(err.drifts.len(), 1);
        assert_eq!(err.drifts[0].incremental, 100);
        assert_eq!(err.drifts[0].replayed, 90);
        assert_eq!(err.drifts[0].key.0.as_ref(), "holder:a");
    }

    #[test]
    fn missing_key_counts_as_zero() {
        let incremental = apply(&Projection::empty(), &tx("holder:a", 100, 1));
        let replayed = Projection::empty();

        let err = reconcile(&incremental, &replayed).unwrap_err();
        assert_eq!(err.drifts[0].replayed, 0);
    }

    #[test]
    fn empty_projections_agree() {
        assert!(reconcile(&Projection::empty(), &Projection::empty()).is_ok());
    }
}
