//! Create-holder command implementation.

use super::parse_holder_type;
use capledger_core::EntityId;
use capledger_ledger::Ledger;

pub fn run(
    dir: String,
    name: String,
    holder_type: String,
    founder: bool,
    entity: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let holder_type = parse_holder_type(&holder_type)?;
    let entity_id = entity.map(EntityId::parse).transpose()?;

    let mut ledger = Ledger::open(&dir)?;
    let holder = ledger.create_shareholder(&name, holder_type, founder, entity_id)?;

    println!("Created shareholder {}", holder.id);
    Ok(())
}
