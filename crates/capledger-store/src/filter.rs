//! Transaction filtering API for selective iteration.

use crate::traits::StoreReader;
use crate::TxJson;
use chrono::NaiveDate;

/// Trait for filtering transactions during iteration.
pub trait TxFilter {
    /// Returns true if the transaction matches the filter criteria.
    fn matches(&self, tx: &TxJson) -> bool;
}

/// Filter by shareholder ID.
#[derive(Debug, Clone)]
pub struct ShareholderFilter {
    /// Shareholder ID to match.
    pub shareholder_id: String,
}

impl TxFilter for ShareholderFilter {
    fn matches(&self, tx: &TxJson) -> bool {
        tx.get("shareholder_id")
            .and_then(|v| v.as_str())
            .map(|s| s == self.shareholder_id)
            .unwrap_or(false)
    }
}

/// Filter by share class ID.
#[derive(Debug, Clone)]
pub struct ShareClassFilter {
    /// Share class ID to match.
    pub share_class_id: String,
}

impl TxFilter for ShareClassFilter {
    fn matches(&self, tx: &TxJson) -> bool {
        tx.get("share_class_id")
            .and_then(|v| v.as_str())
            .map(|s| s == self.share_class_id)
            .unwrap_or(false)
    }
}

/// Filter by transaction type.
#[derive(Debug, Clone)]
pub struct TransactionTypeFilter {
    /// Transaction type to match (e.g., "issuance", "repurchase").
    pub transaction_type: String,
}

impl TxFilter for TransactionTypeFilter {
    fn matches(&self, tx: &TxJson) -> bool {
        tx.get("transaction_type")
            .and_then(|v| v.as_str())
            .map(|s| s == self.transaction_type)
            .unwrap_or(false)
    }
}

/// Filter by business date range.
#[derive(Debug, Clone)]
pub struct DateRangeFilter {
    /// Include transactions on or after this date.
    pub after: Option<NaiveDate>,
    /// Include transactions on or before this date.
    pub before: Option<NaiveDate>,
}

impl TxFilter for DateRangeFilter {
    fn matches(&self, tx: &TxJson) -> bool {
        let occurred_at = tx
            .get("occurred_at")
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse::<NaiveDate>().ok());

        let occurred_at = match occurred_at {
            Some(d) => d,
            None => return false,
        };

        if let Some(after) = self.after {
            if occurred_at < after {
                return false;
            }
        }

        if let Some(before) = self.before {
            if occurred_at > before {
                return false;
            }
        }

        true
    }
}

/// Composite filter: all filters must match (AND).
pub struct AndFilter {
    /// Filters to combine with AND logic.
    pub filters: Vec<Box<dyn TxFilter>>,
}

impl TxFilter for AndFilter {
    fn matches(&self, tx: &TxJson) -> bool {
        self.filters.iter().all(|f| f.matches(tx))
    }
}

/// Composite filter: any filter must match (OR).
pub struct OrFilter {
    /// Filters to combine with OR logic.
    pub filters: Vec<Box<dyn TxFilter>>,
}

impl TxFilter for OrFilter {
    fn matches(&self, tx: &TxJson) -> bool {
        self.filters.iter().any(|f| f.matches(tx))
    }
}

/// Reader that filters transactions from an underlying reader.
pub struct FilteredReader<R: StoreReader, F: TxFilter> {
    /// Underlying reader.
    reader: R,
    /// Filter to apply.
    filter: F,
}

impl<R: StoreReader, F: TxFilter> FilteredReader<R, F> {
    /// Creates a new filtered reader.
    pub fn new(reader: R, filter: F) -> Self {
        Self { reader, filter }
    }
}

impl<R: StoreReader, F: TxFilter> StoreReader for FilteredReader<R, F> {
    fn read_next(&mut self) -> Result<Option<TxJson>, crate::error::StoreError> {
        loop {
            match self.reader.read_next()? {
                None => return Ok(None),
                Some(tx) if self.filter.matches(&tx) => return Ok(Some(tx)),
                Some(_) => continue, // skip non-matching
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tx(holder: &str, class: &str, tx_type: &str, date: &str) -> TxJson {
        json!({
            "shareholder_id": holder,
            "share_class_id": class,
            "transaction_type": tx_type,
            "occurred_at": date
        })
    }

    #[test]
    fn shareholder_filter_matches_exactly() {
        let f = ShareholderFilter {
            shareholder_id: "holder:alice".to_string(),
        };
        assert!(f.matches(&tx("holder:alice", "class:common", "issuance", "2025-01-01")));
        assert!(!f.matches(&tx("holder:bob", "class:common", "issuance", "2025-01-01")));
    }

    #[test]
    fn date_range_filter_bounds_are_inclusive() {
        let f = DateRangeFilter {
            after: Some("2025-01-01".parse().unwrap()),
            before: Some("2025-01-31".parse().unwrap()),
        };
        assert!(f.matches(&tx("holder:a", "class:c", "issuance", "2025-01-01")));
        assert!(f.matches(&tx("holder:a", "class:c", "issuance", "2025-01-31")));
        assert!(!f.matches(&tx("holder:a", "class:c", "issuance", "2025-02-01")));
        assert!(!f.matches(&tx("holder:a", "class:c", "issuance", "2024-12-31")));
    }

    #[test]
    fn and_filter_requires_all() {
        let f = AndFilter {
            filters: vec![
                Box::new(ShareholderFilter {
                    shareholder_id: "holder:alice".to_string(),
                }),
                Box::new(TransactionTypeFilter {
                    transaction_type: "repurchase".to_string(),
                }),
            ],
        };
        assert!(f.matches(&tx("holder:alice", "class:c", "repurchase", "2025-01-01")));
        assert!(!f.matches(&tx("holder:alice", "class:c", "issuance", "2025-01-01")));
    }
}
