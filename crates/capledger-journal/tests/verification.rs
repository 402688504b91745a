use capledger_journal::{verify_sequences, verify_tx_id};
use capledger_core::compute_tx_id;
use serde_json::json;

fn make_tx(sequence: u64, shares: u64) -> serde_json::Value {
    let mut tx = json!({
        "record_type": "equity_transaction",
        "record_version": "1",
        "shareholder_id": "holder:alice",
        "share_class_id": "class:common",
        "transaction_type": "issuance",
        "shares": shares,
        "total_amount": "0",
        "occurred_at": "2025-01-15",
        "sequence": sequence,
        "committed_at": "2025-01-15T10:00:00Z"
    });
    let tx_id = compute_tx_id(&tx).unwrap();
    tx["tx_id"] = serde_json::to_value(&tx_id).unwrap();
    tx
}

#[test]
fn verify_accepts_untampered_transaction() {
    let tx = make_tx(1, 1000);
    assert!(verify_tx_id(&tx).unwrap());
}

#[test]
fn verify_rejects_modified_shares() {
    let mut tx = make_tx(1, 1000);
    tx["shares"] = json!(2000);
    assert!(!verify_tx_id(&tx).unwrap());
}

#[test]
fn verify_rejects_missing_tx_id() {
    let mut tx = make_tx(1, 1000);
    tx.as_object_mut().unwrap().remove("tx_id");
    assert!(verify_tx_id(&tx).is_err());
}

#[test]
fn sequences_verify_across_stream() {
    let txs: Vec<_> = (1..=5).map(|s| make_tx(s, 100)).collect();
    assert!(verify_sequences(txs.iter()).is_ok());

    let mut reordered = txs.clone();
    reordered.swap(1, 3);
    assert!(verify_sequences(reordered.iter()).is_err());
}
