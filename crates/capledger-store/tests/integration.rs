use capledger_core::{
    verify_tx_id, SequenceToken, ShareClassId, ShareholderId, TransactionDraft, TransactionType,
};
use capledger_store::{
    parse_transaction, DateRangeFilter, FilteredReader, JournalBackendReader,
    JournalBackendWriter, ReadMode, ShareholderFilter, StoreReader, StoreWriter, TransactionLog,
    TransactionTypeFilter, TypedRecord, WriteOptions,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;
use tempfile::TempDir;

fn draft(
    holder: &str,
    class: &str,
    tx_type: TransactionType,
    shares: u64,
    date: &str,
) -> TransactionDraft {
    TransactionDraft {
        shareholder_id: ShareholderId::parse(holder).unwrap(),
        share_class_id: ShareClassId::parse(class).unwrap(),
        transaction_type: tx_type,
        shares,
        total_amount: Decimal::ZERO,
        occurred_at: date.parse::<NaiveDate>().unwrap(),
    }
}

#[test]
fn append_assigns_increasing_sequences() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("transactions.eqj");
    let mut log = TransactionLog::open(&path, WriteOptions::default()).unwrap();

    let tx1 = log
        .append(
            &draft("holder:alice", "class:common", TransactionType::Issuance, 100, "2025-01-01"),
            SequenceToken::NONE,
        )
        .unwrap();
    let tx2 = log
        .append(
            &draft("holder:bob", "class:common", TransactionType::Issuance, 50, "2025-01-02"),
            SequenceToken::NONE,
        )
        .unwrap();

    assert_eq!(tx1.sequence, SequenceToken(1));
    assert_eq!(tx2.sequence, SequenceToken(2));
    assert_eq!(log.version(), SequenceToken(2));
}

#[test]
fn stale_expected_version_is_a_conflict() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("transactions.eqj");
    let mut log = TransactionLog::open(&path, WriteOptions::default()).unwrap();

    let d = draft("holder:alice", "class:common", TransactionType::Issuance, 100, "2025-01-01");
    log.append(&d, SequenceToken::NONE).unwrap();

    // A second writer that validated against the empty key must be rejected.
    let err = log.append(&d, SequenceToken::NONE).unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(log.len(), 1);

    // Retrying with the fresh version succeeds.
    let key = (d.shareholder_id.clone(), d.share_class_id.clone());
    let fresh = log.latest_sequence(&key);
    assert!(log.append(&d, fresh).is_ok());
}

#[test]
fn conflicts_are_per_key() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("transactions.eqj");
    let mut log = TransactionLog::open(&path, WriteOptions::default()).unwrap();

    log.append(
        &draft("holder:alice", "class:common", TransactionType::Issuance, 100, "2025-01-01"),
        SequenceToken::NONE,
    )
    .unwrap();

    // A different key is causally independent; NONE is still its version.
    assert!(log
        .append(
            &draft("holder:bob", "class:common", TransactionType::Issuance, 50, "2025-01-01"),
            SequenceToken::NONE,
        )
        .is_ok());
}

#[test]
fn committed_transactions_survive_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("transactions.eqj");

    {
        let mut log = TransactionLog::open(&path, WriteOptions::default()).unwrap();
        log.append(
            &draft("holder:alice", "class:common", TransactionType::Issuance, 100, "2025-01-01"),
            SequenceToken::NONE,
        )
        .unwrap();
    }

    let log = TransactionLog::open(&path, WriteOptions::default()).unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log.version(), SequenceToken(1));

    let txs = log.list(None).unwrap();
    assert_eq!(txs[0].shares, 100);
    assert_eq!(
        txs[0].shareholder_id,
        ShareholderId::parse("holder:alice").unwrap()
    );
}

#[test]
fn list_orders_by_occurred_at_then_sequence() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("transactions.eqj");
    let mut log = TransactionLog::open(&path, WriteOptions::default()).unwrap();

    // Committed out of business-date order.
    log.append(
        &draft("holder:alice", "class:common", TransactionType::Issuance, 10, "2025-03-01"),
        SequenceToken::NONE,
    )
    .unwrap();
    log.append(
        &draft("holder:bob", "class:common", TransactionType::Issuance, 20, "2025-01-01"),
        SequenceToken::NONE,
    )
    .unwrap();
    log.append(
        &draft("holder:carol", "class:common", TransactionType::Issuance, 30, "2025-03-01"),
        SequenceToken::NONE,
    )
    .unwrap();

    let txs = log.list(None).unwrap();
    let order: Vec<u64> = txs.iter().map(|t| t.sequence.0).collect();
    // 2025-01-01 first, then the two 2025-03-01 entries tie-broken by sequence.
    assert_eq!(order, vec![2, 1, 3]);
}

#[test]
fn list_applies_filters() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("transactions.eqj");
    let mut log = TransactionLog::open(&path, WriteOptions::default()).unwrap();

    log.append(
        &draft("holder:alice", "class:common", TransactionType::Issuance, 100, "2025-01-01"),
        SequenceToken::NONE,
    )
    .unwrap();
    log.append(
        &draft("holder:alice", "class:common", TransactionType::Repurchase, 40, "2025-02-01"),
        SequenceToken(1),
    )
    .unwrap();
    log.append(
        &draft("holder:bob", "class:common", TransactionType::Issuance, 50, "2025-01-15"),
        SequenceToken::NONE,
    )
    .unwrap();

    let by_holder = ShareholderFilter {
        shareholder_id: "holder:alice".to_string(),
    };
    assert_eq!(log.list(Some(&by_holder)).unwrap().len(), 2);

    let by_type = TransactionTypeFilter {
        transaction_type: "repurchase".to_string(),
    };
    let repurchases = log.list(Some(&by_type)).unwrap();
    assert_eq!(repurchases.len(), 1);
    assert_eq!(repurchases[0].shares, 40);

    let january = DateRangeFilter {
        after: Some("2025-01-01".parse().unwrap()),
        before: Some("2025-01-31".parse().unwrap()),
    };
    assert_eq!(log.list(Some(&january)).unwrap().len(), 2);
}

#[test]
fn committed_transactions_carry_verifiable_ids() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("transactions.eqj");
    let mut log = TransactionLog::open(&path, WriteOptions::default()).unwrap();

    let tx = log
        .append(
            &draft("holder:alice", "class:common", TransactionType::Issuance, 100, "2025-01-01"),
            SequenceToken::NONE,
        )
        .unwrap();

    // Verify against the bytes actually on disk, not the in-memory struct.
    let mut reader = JournalBackendReader::open(&path, ReadMode::Strict).unwrap();
    let stored = reader.read_next().unwrap().unwrap();
    assert!(verify_tx_id(&stored, &tx.tx_id).unwrap());
}

#[test]
fn filtered_reader_skips_non_matching() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("transactions.eqj");

    {
        let mut writer = JournalBackendWriter::open(&path, WriteOptions::default()).unwrap();
        writer
            .append(&json!({
                "record_type": "equity_transaction",
                "shareholder_id": "holder:alice",
                "sequence": 1
            }))
            .unwrap();
        writer
            .append(&json!({
                "record_type": "equity_transaction",
                "shareholder_id": "holder:bob",
                "sequence": 2
            }))
            .unwrap();
        writer.finish().unwrap();
    }

    let reader = JournalBackendReader::open(&path, ReadMode::Strict).unwrap();
    let filter = ShareholderFilter {
        shareholder_id: "holder:bob".to_string(),
    };
    let mut filtered = FilteredReader::new(reader, filter);

    let tx = filtered.read_next().unwrap().unwrap();
    assert_eq!(tx["shareholder_id"], "holder:bob");
    assert!(filtered.read_next().unwrap().is_none());
}

#[test]
fn open_rejects_foreign_record_types() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("transactions.eqj");

    {
        let mut writer = JournalBackendWriter::open(&path, WriteOptions::default()).unwrap();
        writer
            .append(&json!({"record_type": "stock_split", "sequence": 1}))
            .unwrap();
        writer.finish().unwrap();
    }

    assert!(TransactionLog::open(&path, WriteOptions::default()).is_err());
}

#[test]
fn typed_parse_round_trips_committed_transaction() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("transactions.eqj");
    let mut log = TransactionLog::open(&path, WriteOptions::default()).unwrap();
    let tx = log
        .append(
            &draft("holder:alice", "class:common", TransactionType::Issuance, 100, "2025-01-01"),
            SequenceToken::NONE,
        )
        .unwrap();

    let mut reader = JournalBackendReader::open(&path, ReadMode::Strict).unwrap();
    let stored = reader.read_next().unwrap().unwrap();
    match parse_transaction(&stored).unwrap() {
        TypedRecord::Equity(parsed) => assert_eq!(parsed, tx),
        TypedRecord::Unknown(_) => panic!("expected equity transaction"),
    }
}
