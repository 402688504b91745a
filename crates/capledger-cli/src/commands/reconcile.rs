//! Reconcile command implementation.

use capledger_ledger::{Ledger, LedgerError};
use serde_json::json;

pub fn run(dir: String, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ledger = Ledger::open(&dir)?;

    match ledger.reconcile() {
        Ok(count) => {
            if json_output {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "ok": true,
                        "transactions": count,
                    }))?
                );
            } else {
                println!("Reconciliation clean: {} transaction(s) replayed", count);
            }
            Ok(())
        }
        Err(LedgerError::Integrity(integrity)) => {
            if json_output {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "ok": false,
                        "drifts": integrity.drifts,
                    }))?
                );
            } else {
                for drift in &integrity.drifts {
                    eprintln!(
                        "Drift on ({}, {}): incremental {} vs replayed {}",
                        drift.key.0, drift.key.1, drift.incremental, drift.replayed
                    );
                }
            }
            Err(integrity.into())
        }
        Err(e) => Err(e.into()),
    }
}
