//! Output formatting utilities.

use capledger_core::EquityTransaction;
use capledger_ledger::OwnershipRow;
use serde_json::Value;

/// Formats a value as pretty JSON.
pub fn format_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Formats a transaction as a table row.
pub fn format_tx_row(tx: &EquityTransaction) -> String {
    format!(
        "{:<6} {:<12} {:<24} {:<24} {:>12} {}",
        tx.sequence,
        tx.transaction_type.as_str(),
        truncate(tx.shareholder_id.as_ref(), 24),
        truncate(tx.share_class_id.as_ref(), 24),
        tx.shares,
        tx.occurred_at
    )
}

/// Prints the transaction table header.
#[allow(clippy::print_literal)]
pub fn print_tx_header() {
    println!(
        "{:<6} {:<12} {:<24} {:<24} {:>12} {}",
        "SEQ", "TYPE", "SHAREHOLDER", "CLASS", "SHARES", "DATE"
    );
    println!("{}", "-".repeat(94));
}

/// Formats an ownership row.
pub fn format_ownership_row(row: &OwnershipRow) -> String {
    format!(
        "{:<24} {:>14} {:>9.2}%",
        truncate(row.shareholder_id.as_ref(), 24),
        row.shares,
        row.percentage
    )
}

/// Prints the ownership table header.
#[allow(clippy::print_literal)]
pub fn print_ownership_header() {
    println!("{:<24} {:>14} {:>10}", "SHAREHOLDER", "SHARES", "PCT");
    println!("{}", "-".repeat(50));
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}
