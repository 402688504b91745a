//! Record command implementation.

use std::str::FromStr;

use super::{parse_date, parse_tx_type};
use crate::output;
use capledger_core::{ShareClassId, ShareholderId, TransactionDraft};
use capledger_ledger::Ledger;
use rust_decimal::Decimal;

#[allow(clippy::too_many_arguments)]
pub fn run(
    dir: String,
    holder: String,
    class: String,
    tx_type: String,
    shares: u64,
    amount: String,
    date: String,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let draft = TransactionDraft {
        shareholder_id: ShareholderId::parse(holder)?,
        share_class_id: ShareClassId::parse(class)?,
        transaction_type: parse_tx_type(&tx_type)?,
        shares,
        total_amount: Decimal::from_str(&amount)
            .map_err(|e| format!("invalid amount '{}': {}", amount, e))?,
        occurred_at: parse_date(&date)?,
    };

    let mut ledger = Ledger::open(&dir)?;
    let tx = ledger.record_transaction(&draft)?;

    if json {
        println!("{}", output::format_json(&serde_json::to_value(&tx)?));
    } else {
        println!(
            "Committed {} of {} shares as sequence {} (tx {})",
            tx.transaction_type.as_str(),
            tx.shares,
            tx.sequence,
            tx.tx_id
        );
    }
    Ok(())
}
