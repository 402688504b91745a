//! Summary command implementation: issued vs. authorized for one class.

use crate::output;
use capledger_core::ShareClassId;
use capledger_ledger::Ledger;

pub fn run(dir: String, class: String, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let class_id = ShareClassId::parse(class)?;

    let ledger = Ledger::open(&dir)?;
    let summary = ledger.share_class_summary(&class_id)?;

    if json {
        println!("{}", output::format_json(&serde_json::to_value(&summary)?));
    } else {
        println!("Class:       {}", class_id);
        println!("Authorized:  {}", summary.authorized);
        println!("Issued:      {}", summary.issued);
        println!("Available:   {}", summary.available);
        println!("Utilization: {:.2}%", summary.utilization_pct);
    }
    Ok(())
}
