//! Consistency rules checked before a transaction is committed.
//!
//! [`validate`] is a pure function over the candidate draft and the
//! current projected numbers for the affected key and class. It touches no
//! storage and can be called standalone, which is how the rule tests
//! exercise it.

use thiserror::Error;

use crate::records::{TransactionDraft, TransactionType};

/// A consistency rule the candidate transaction would break.
///
/// All variants are caller-correctable and are surfaced directly to the
/// caller with the offending numbers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    /// Share quantity must be a positive integer that fits a signed
    /// 64-bit holding.
    #[error("share quantity must be positive and within the accountable range")]
    InvalidQuantity,
    /// A repurchase/cancellation would push the holding below zero.
    #[error("insufficient holding: {holding} shares held, {requested} requested")]
    InsufficientHolding {
        /// Shares currently held for the key.
        holding: i64,
        /// Shares the candidate would remove.
        requested: u64,
    },
    /// An issuance/exercise would push the class past its authorized ceiling.
    #[error("exceeds authorized shares: {issued} issued + {requested} requested > {authorized} authorized")]
    ExceedsAuthorized {
        /// Shares currently issued across the class.
        issued: i64,
        /// Shares the candidate would add.
        requested: u64,
        /// Authorized ceiling for the class.
        authorized: u64,
    },
}

/// Validates a candidate transaction against the current projected state.
///
/// Rules are applied in order:
/// 1. `1 <= shares <= i64::MAX`, else [`RuleViolation::InvalidQuantity`].
///    Holdings are signed 64-bit sums, so a quantity past `i64::MAX` can
///    never be accounted for and is rejected outright.
/// 2. repurchase/cancellation: resulting holding must stay `>= 0`, else
///    [`RuleViolation::InsufficientHolding`]
/// 3. issuance/exercise: resulting issued total must stay within the
///    class's authorized ceiling, else [`RuleViolation::ExceedsAuthorized`]
///
/// `current_holding` is the projected holding for the candidate's
/// `(shareholder, share class)` key; `current_issued` is the projected
/// issued total for the class; `authorized` is the class ceiling.
pub fn validate(
    candidate: &TransactionDraft,
    current_holding: i64,
    current_issued: i64,
    authorized: u64,
) -> Result<(), RuleViolation> {
    if candidate.shares == 0 || i64::try_from(candidate.shares).is_err() {
        return Err(RuleViolation::InvalidQuantity);
    }

    // The comparisons run in i128 so no combination of inputs can wrap.
    match candidate.transaction_type {
        TransactionType::Repurchase | TransactionType::Cancellation => {
            if i128::from(current_holding) - i128::from(candidate.shares) < 0 {
                return Err(RuleViolation::InsufficientHolding {
                    holding: current_holding,
                    requested: candidate.shares,
                });
            }
        }
        TransactionType::Issuance | TransactionType::Exercise => {
            if i128::from(current_issued) + i128::from(candidate.shares) > i128::from(authorized) {
                return Err(RuleViolation::ExceedsAuthorized {
                    issued: current_issued,
                    requested: candidate.shares,
                    authorized,
                });
            }
        }
    }

    Ok(())
}
