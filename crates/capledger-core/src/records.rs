use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::digest::Digest;
use crate::identifiers::{EntityId, ShareClassId, ShareholderId};

/// Record type tag stored on every committed equity transaction.
pub const EQUITY_RECORD_TYPE: &str = "equity_transaction";

/// Record format version: "1".
pub const RECORD_VERSION: &str = "1";

/// Category of equity: common or preferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassType {
    /// Common stock.
    Common,
    /// Preferred stock.
    Preferred,
}

/// A share class: a category of equity with its own authorized ceiling.
///
/// Immutable once referenced by a transaction, except for
/// `authorized_shares`, which may be amended but never below the number of
/// shares currently issued for the class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareClass {
    /// Share class identifier.
    pub id: ShareClassId,
    /// Display name (e.g., "Common", "Series A Preferred").
    pub name: String,
    /// Common or preferred.
    pub class_type: ClassType,
    /// Maximum number of shares this class may ever have issued.
    pub authorized_shares: u64,
}

/// Kind of shareholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareholderType {
    /// A natural person.
    Individual,
    /// A company or other legal entity.
    Entity,
    /// A trust.
    Trust,
}

/// A shareholder: purely descriptive; holds no share data itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shareholder {
    /// Shareholder identifier.
    pub id: ShareholderId,
    /// Display name.
    pub name: String,
    /// Kind of shareholder.
    pub shareholder_type: ShareholderType,
    /// Whether this shareholder is a founder.
    pub is_founder: bool,
    /// Optional link to a legal entity record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<EntityId>,
}

/// Kind of equity transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// New shares issued to a shareholder.
    Issuance,
    /// Option exercise; increases the holding like an issuance.
    Exercise,
    /// Company buys shares back from a shareholder.
    Repurchase,
    /// Shares cancelled; removed from the holding.
    Cancellation,
}

impl TransactionType {
    /// Signed contribution of this transaction type to a holding:
    /// `+1` for issuance/exercise, `-1` for repurchase/cancellation.
    pub fn sign(self) -> i64 {
        match self {
            TransactionType::Issuance | TransactionType::Exercise => 1,
            TransactionType::Repurchase | TransactionType::Cancellation => -1,
        }
    }

    /// Stable lowercase name matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Issuance => "issuance",
            TransactionType::Exercise => "exercise",
            TransactionType::Repurchase => "repurchase",
            TransactionType::Cancellation => "cancellation",
        }
    }
}

/// Monotonically increasing logical clock assigned at commit time.
///
/// Doubles as the optimistic-concurrency token: an append carries the
/// latest sequence the caller observed for the affected
/// `(shareholder, share class)` key, and `SequenceToken::NONE` means the
/// caller has seen no transaction for that key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct SequenceToken(pub u64);

impl SequenceToken {
    /// Token meaning "no transaction committed yet".
    pub const NONE: SequenceToken = SequenceToken(0);

    /// The next token in sequence.
    pub fn next(self) -> SequenceToken {
        SequenceToken(self.0 + 1)
    }
}

impl std::fmt::Display for SequenceToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Key identifying one holding: a shareholder's position in one class.
pub type HoldingKey = (ShareholderId, ShareClassId);

/// An equity transaction as submitted by a caller, before commit.
///
/// The store assigns `sequence`, `committed_at`, and the content-derived
/// `tx_id` at commit time; drafts carry only caller-supplied fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    /// Shareholder whose holding changes.
    pub shareholder_id: ShareholderId,
    /// Share class affected.
    pub share_class_id: ShareClassId,
    /// Kind of transaction.
    pub transaction_type: TransactionType,
    /// Number of shares (must be positive).
    pub shares: u64,
    /// Monetary consideration; may be zero.
    pub total_amount: Decimal,
    /// Business date the transaction occurred.
    pub occurred_at: NaiveDate,
}

/// A committed equity transaction: immutable, append-only audit record.
///
/// Never updated or deleted; corrections are modeled as new offsetting
/// transactions (e.g., a cancellation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityTransaction {
    /// Content-derived transaction ID (computed from canonical bytes).
    pub tx_id: Digest,
    /// Record type: "equity_transaction".
    pub record_type: String,
    /// Record version: "1".
    pub record_version: String,
    /// Shareholder whose holding changes.
    pub shareholder_id: ShareholderId,
    /// Share class affected.
    pub share_class_id: ShareClassId,
    /// Kind of transaction.
    pub transaction_type: TransactionType,
    /// Number of shares (positive).
    pub shares: u64,
    /// Monetary consideration; may be zero.
    pub total_amount: Decimal,
    /// Business date the transaction occurred.
    pub occurred_at: NaiveDate,
    /// Commit-time logical clock; strictly increasing, never reused.
    pub sequence: SequenceToken,
    /// Commit timestamp.
    pub committed_at: DateTime<Utc>,
}

impl EquityTransaction {
    /// The `(shareholder, share class)` key this transaction affects.
    pub fn key(&self) -> HoldingKey {
        (self.shareholder_id.clone(), self.share_class_id.clone())
    }

    /// Signed share delta: `sign * shares`.
    ///
    /// Validated commits keep `shares` within `i64::MAX`. A foreign record
    /// past that bound saturates instead of wrapping to the opposite sign.
    pub fn signed_shares(&self) -> i64 {
        let magnitude = i64::try_from(self.shares).unwrap_or(i64::MAX);
        self.transaction_type.sign() * magnitude
    }
}
