//! Verify command implementation: tx IDs and sequence ordering.

use capledger_journal::verification::{verify_sequences, verify_tx_id};
use capledger_journal::{JournalReader, ReadMode};
use serde_json::json;

pub fn run(journal: String, strict: bool, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = JournalReader::open(&journal, ReadMode::Strict)
        .map_err(|e| format!("Failed to open journal: {}", e))?;

    let mut transactions = Vec::new();
    while let Some(tx) = reader.read_transaction()? {
        transactions.push(tx);
    }

    let mut all_ok = true;
    let mut results = Vec::new();

    for tx in &transactions {
        let sequence = tx.get("sequence").and_then(|v| v.as_u64()).unwrap_or(0);
        let verdict = match verify_tx_id(tx) {
            Ok(true) => "ok",
            Ok(false) => {
                all_ok = false;
                "mismatch"
            }
            Err(e) => {
                all_ok = false;
                if !json_output {
                    eprintln!("Error verifying sequence {}: {}", sequence, e);
                }
                "invalid"
            }
        };
        results.push((sequence, verdict));
    }

    let sequence_verdict = match verify_sequences(transactions.iter()) {
        Ok(()) => "ok",
        Err(e) => {
            all_ok = false;
            if !json_output {
                eprintln!("Sequence check failed: {}", e);
            }
            "broken"
        }
    };

    if json_output {
        let tx_results: Vec<_> = results
            .iter()
            .map(|(sequence, verdict)| json!({"sequence": sequence, "verdict": verdict}))
            .collect();
        let report = json!({
            "transactions": tx_results,
            "sequence_order": sequence_verdict,
            "ok": all_ok,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{:<8} {}", "SEQ", "TX_ID");
        println!("{}", "-".repeat(20));
        for (sequence, verdict) in &results {
            println!("{:<8} {}", sequence, verdict);
        }
        println!("Sequence order: {}", sequence_verdict);
        println!(
            "{} transaction(s) checked: {}",
            results.len(),
            if all_ok { "all ok" } else { "FAILED" }
        );
    }

    if strict && !all_ok {
        std::process::exit(1);
    }
    Ok(())
}
