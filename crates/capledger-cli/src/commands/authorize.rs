//! Authorize command implementation: amend a class's authorized ceiling.

use capledger_core::ShareClassId;
use capledger_ledger::Ledger;

pub fn run(dir: String, class: String, shares: u64) -> Result<(), Box<dyn std::error::Error>> {
    let class_id = ShareClassId::parse(class)?;

    let mut ledger = Ledger::open(&dir)?;
    let class = ledger.amend_authorized(&class_id, shares)?;

    println!(
        "Amended {}: {} shares authorized",
        class.id, class.authorized_shares
    );
    Ok(())
}
