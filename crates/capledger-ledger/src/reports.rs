//! Read-only aggregation queries over the latest committed projection.
//!
//! Each query is pure and recomputed per call; nothing here caches or
//! mutates. Callers hand in the projection snapshot they want to report
//! on.

use std::collections::BTreeMap;

use capledger_core::{ShareClass, ShareClassId, ShareholderId};
use serde::{Deserialize, Serialize};

use crate::projection::Projection;

/// Issued-vs-authorized summary for one share class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareClassSummary {
    /// Authorized ceiling for the class.
    pub authorized: u64,
    /// Shares currently issued.
    pub issued: i64,
    /// Remaining headroom: `authorized - issued`.
    pub available: i64,
    /// `issued / authorized * 100`; defined as `0` when nothing is
    /// authorized.
    pub utilization_pct: f64,
}

/// One row of the ownership table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnershipRow {
    /// The shareholder.
    pub shareholder_id: ShareholderId,
    /// Shares held, summed across all share classes.
    pub shares: i64,
    /// Share of total issued across all classes, in percent.
    pub percentage: f64,
}

/// Computes the issued-vs-authorized summary for one share class.
pub fn share_class_summary(projection: &Projection, class: &ShareClass) -> ShareClassSummary {
    let issued = projection.issued_for_class(&class.id);
    let authorized = class.authorized_shares;
    let utilization_pct = if authorized == 0 {
        0.0
    } else {
        issued as f64 / authorized as f64 * 100.0
    };

    ShareClassSummary {
        authorized,
        issued,
        available: authorized as i64 - issued,
        utilization_pct,
    }
}

/// Computes the ownership table: shares per shareholder summed across all
/// classes, filtered to positive holdings, sorted descending by shares
/// with `shareholder_id` as the deterministic tie-break.
///
/// Percentages are taken against total issued across all classes pooled
/// together. When nothing is issued the table is empty rather than a
/// division by zero.
pub fn ownership_table(projection: &Projection) -> Vec<OwnershipRow> {
    let total_issued = projection.total_issued();
    if total_issued == 0 {
        return Vec::new();
    }

    let mut by_holder: BTreeMap<ShareholderId, i64> = BTreeMap::new();
    for ((holder, _class), shares) in projection.holdings() {
        *by_holder.entry(holder.clone()).or_insert(0) += shares;
    }

    let mut rows: Vec<OwnershipRow> = by_holder
        .into_iter()
        .filter(|(_, shares)| *shares > 0)
        .map(|(shareholder_id, shares)| OwnershipRow {
            shareholder_id,
            shares,
            percentage: shares as f64 / total_issued as f64 * 100.0,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.shares
            .cmp(&a.shares)
            .then_with(|| a.shareholder_id.cmp(&b.shareholder_id))
    });
    rows
}

/// Holdings for one shareholder, keyed by share class; zero-share entries
/// are omitted.
pub fn holdings_for(
    projection: &Projection,
    shareholder_id: &ShareholderId,
) -> BTreeMap<ShareClassId, i64> {
    projection
        .holdings()
        .iter()
        .filter(|((holder, _), shares)| holder == shareholder_id && **shares != 0)
        .map(|((_, class), shares)| (class.clone(), *shares))
        .collect()
}
