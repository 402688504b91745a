//! List command implementation.

use super::{parse_date, parse_tx_type};
use crate::output;
use capledger_ledger::Ledger;
use capledger_store::{
    AndFilter, DateRangeFilter, ShareClassFilter, ShareholderFilter, TransactionTypeFilter,
    TxFilter,
};

#[allow(clippy::too_many_arguments)]
pub fn run(
    dir: String,
    holder: Option<String>,
    class: Option<String>,
    tx_type: Option<String>,
    from: Option<String>,
    to: Option<String>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut filters: Vec<Box<dyn TxFilter>> = Vec::new();
    if let Some(holder) = holder {
        filters.push(Box::new(ShareholderFilter {
            shareholder_id: holder,
        }));
    }
    if let Some(class) = class {
        filters.push(Box::new(ShareClassFilter {
            share_class_id: class,
        }));
    }
    if let Some(tx_type) = tx_type {
        filters.push(Box::new(TransactionTypeFilter {
            transaction_type: parse_tx_type(&tx_type)?.as_str().to_string(),
        }));
    }
    if from.is_some() || to.is_some() {
        filters.push(Box::new(DateRangeFilter {
            after: from.as_deref().map(parse_date).transpose()?,
            before: to.as_deref().map(parse_date).transpose()?,
        }));
    }

    let filter = if filters.is_empty() {
        None
    } else {
        Some(AndFilter { filters })
    };

    let ledger = Ledger::open(&dir)?;
    let txs = ledger.transactions(filter.as_ref().map(|f| f as &dyn TxFilter))?;

    if !json {
        output::print_tx_header();
    }
    for tx in &txs {
        if json {
            println!("{}", serde_json::to_string(tx)?);
        } else {
            println!("{}", output::format_tx_row(tx));
        }
    }
    Ok(())
}
