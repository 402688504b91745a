//! Holdings command implementation: one shareholder's position by class.

use crate::output;
use capledger_core::ShareholderId;
use capledger_ledger::Ledger;

pub fn run(dir: String, holder: String, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let holder_id = ShareholderId::parse(holder)?;

    let ledger = Ledger::open(&dir)?;
    let holdings = ledger.holdings_for(&holder_id)?;

    if json {
        println!("{}", output::format_json(&serde_json::to_value(&holdings)?));
        return Ok(());
    }

    if holdings.is_empty() {
        println!("{} holds no shares.", holder_id);
        return Ok(());
    }

    println!("{:<24} {:>14}", "CLASS", "SHARES");
    println!("{}", "-".repeat(39));
    for (class, shares) in &holdings {
        println!("{:<24} {:>14}", class, shares);
    }
    Ok(())
}
