//! Init command implementation.

use capledger_ledger::Ledger;

pub fn run(dir: String) -> Result<(), Box<dyn std::error::Error>> {
    let ledger = Ledger::open(&dir)?;
    println!("Initialized ledger at {}", ledger.dir().display());
    Ok(())
}
