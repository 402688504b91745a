//! Typed transaction parsing from JSON.

use crate::TxJson;
use capledger_core::{EquityTransaction, EQUITY_RECORD_TYPE};
use thiserror::Error;

/// Error that can occur when parsing a transaction.
#[derive(Error, Debug)]
pub enum ParseError {
    /// JSON deserialization error.
    #[error("deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Typed representation of a journal record.
#[derive(Debug, Clone)]
pub enum TypedRecord {
    /// A committed equity transaction.
    Equity(EquityTransaction),
    /// Unknown record type.
    Unknown(TxJson),
}

/// Parses a JSON record into a typed record.
///
/// Inspects the `record_type` field to determine the variant, then
/// deserializes to the typed struct. Falls back to `TypedRecord::Unknown`
/// if the record type is unrecognized; projection replay treats those as
/// an integrity defect rather than skipping them silently.
pub fn parse_transaction(json: &TxJson) -> Result<TypedRecord, ParseError> {
    let record_type = json
        .get("record_type")
        .and_then(|v| v.as_str())
        .unwrap_or("");

    match record_type {
        EQUITY_RECORD_TYPE => {
            let tx: EquityTransaction = serde_json::from_value(json.clone())?;
            Ok(TypedRecord::Equity(tx))
        }
        _ => Ok(TypedRecord::Unknown(json.clone())),
    }
}
