//! Command implementations.

pub mod authorize;
pub mod create_class;
pub mod create_holder;
pub mod holdings;
pub mod init;
pub mod list;
pub mod reconcile;
pub mod record;
pub mod summary;
pub mod table;
pub mod verify;

use capledger_core::{ClassType, ShareholderType, TransactionType};
use chrono::NaiveDate;

pub(crate) fn parse_class_type(s: &str) -> Result<ClassType, String> {
    match s {
        "common" => Ok(ClassType::Common),
        "preferred" => Ok(ClassType::Preferred),
        other => Err(format!(
            "invalid class type '{}' (expected common or preferred)",
            other
        )),
    }
}

pub(crate) fn parse_holder_type(s: &str) -> Result<ShareholderType, String> {
    match s {
        "individual" => Ok(ShareholderType::Individual),
        "entity" => Ok(ShareholderType::Entity),
        "trust" => Ok(ShareholderType::Trust),
        other => Err(format!(
            "invalid holder type '{}' (expected individual, entity, or trust)",
            other
        )),
    }
}

pub(crate) fn parse_tx_type(s: &str) -> Result<TransactionType, String> {
    match s {
        "issuance" => Ok(TransactionType::Issuance),
        "exercise" => Ok(TransactionType::Exercise),
        "repurchase" => Ok(TransactionType::Repurchase),
        "cancellation" => Ok(TransactionType::Cancellation),
        other => Err(format!(
            "invalid transaction type '{}' (expected issuance, exercise, repurchase, or cancellation)",
            other
        )),
    }
}

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{}' (expected YYYY-MM-DD): {}", s, e))
}
