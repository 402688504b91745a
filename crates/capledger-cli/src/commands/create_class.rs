//! Create-class command implementation.

use super::parse_class_type;
use capledger_ledger::Ledger;

pub fn run(
    dir: String,
    name: String,
    class_type: String,
    authorized: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let class_type = parse_class_type(&class_type)?;

    let mut ledger = Ledger::open(&dir)?;
    let class = ledger.create_share_class(&name, class_type, authorized)?;

    println!(
        "Created share class {} ({} authorized)",
        class.id, class.authorized_shares
    );
    Ok(())
}
