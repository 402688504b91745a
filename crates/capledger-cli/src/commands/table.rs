//! Table command implementation: the ownership table.

use crate::output;
use capledger_ledger::Ledger;

pub fn run(dir: String, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ledger = Ledger::open(&dir)?;
    let table = ledger.ownership_table();

    if json {
        println!("{}", output::format_json(&serde_json::to_value(&table)?));
        return Ok(());
    }

    if table.is_empty() {
        println!("No shares issued.");
        return Ok(());
    }

    output::print_ownership_header();
    for row in &table {
        println!("{}", output::format_ownership_row(row));
    }
    Ok(())
}
