// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, TimeZone, Utc};
use rupeewise::error::{Error, ImportError, StorageError};
use rupeewise::models::{DebtType, NewDebt, NewTransaction, TransactionType};
use rupeewise::persist::{
    BUDGETS_KEY, BlobStore, DEBTS_KEY, FileBlobStore, MemoryBlobStore, TRANSACTIONS_KEY,
    backup_file_name, export_backup, load_store, parse_backup,
};
use rupeewise::session::Session;
use rupeewise::store::Change;
use rust_decimal::Decimal;
use serde_json::Value;
use tempfile::tempdir;

fn populated<B: BlobStore>(blobs: B) -> Session<B> {
    let mut s = Session::open(blobs).unwrap();
    s.add_transaction(NewTransaction {
        date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        description: "Groceries".into(),
        amount: Decimal::from_str_exact("1234.56").unwrap(),
        r#type: TransactionType::Expense,
        category: "Food".into(),
    })
    .unwrap();
    s.add_transaction(NewTransaction {
        date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        description: "March salary".into(),
        amount: Decimal::from(60000),
        r#type: TransactionType::Income,
        category: "Salary".into(),
    })
    .unwrap();
    let d = s
        .add_debt(NewDebt {
            person_name: "Asha".into(),
            description: Some("Dinner".into()),
            amount: Decimal::from(500),
            r#type: DebtType::OweMe,
            due_date: NaiveDate::from_ymd_opt(2024, 4, 1),
        })
        .unwrap();
    s.toggle_debt_paid(&d.id).unwrap();
    s.upsert_budget("Food", Decimal::from(8000)).unwrap();
    s
}

#[test]
fn every_mutation_is_mirrored_to_storage() {
    let session = populated(MemoryBlobStore::new());
    let reloaded = load_store(session.blobs()).unwrap();
    assert_eq!(&reloaded, session.store());
}

#[test]
fn noop_delete_does_not_rewrite_storage() {
    let mut session = Session::open(MemoryBlobStore::new()).unwrap();
    assert!(!session.delete_transaction("nope").unwrap());
    assert!(!session.delete_debt("nope").unwrap());
    assert!(!session.toggle_debt_paid("nope").unwrap());
    assert_eq!(session.blobs().get(TRANSACTIONS_KEY).unwrap(), None);
    assert_eq!(session.blobs().get(DEBTS_KEY).unwrap(), None);
}

#[test]
fn blobs_use_the_documented_json_shape() {
    let session = populated(MemoryBlobStore::new());
    let raw = session.blobs().get(DEBTS_KEY).unwrap().unwrap();
    let v: Value = serde_json::from_str(&raw).unwrap();
    let d = &v[0];
    assert_eq!(d["personName"], "Asha");
    assert_eq!(d["type"], "owe_me");
    assert_eq!(d["isPaid"], true);
    assert_eq!(d["dueDate"], "2024-04-01");
    assert_eq!(d["amount"].as_f64(), Some(500.0));

    let raw = session.blobs().get(TRANSACTIONS_KEY).unwrap().unwrap();
    let v: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(v[0]["type"], "expense");
    assert_eq!(v[0]["date"], "2024-03-15");
    assert_eq!(v[0]["amount"].as_f64(), Some(1234.56));
}

#[test]
fn loads_blobs_written_with_plain_numbers() {
    let mut blobs = MemoryBlobStore::new();
    blobs
        .put(
            TRANSACTIONS_KEY,
            r#"[{"id":"a1","date":"2024-01-02","description":"Bus","amount":45.5,"type":"expense","category":"Transport"}]"#,
        )
        .unwrap();
    blobs
        .put(
            DEBTS_KEY,
            r#"[{"id":"d1","personName":"Ravi","amount":"120","type":"i_owe"}]"#,
        )
        .unwrap();
    let store = load_store(&blobs).unwrap();
    assert_eq!(
        store.transactions()[0].amount,
        Decimal::from_str_exact("45.5").unwrap()
    );
    let d = &store.debts()[0];
    assert_eq!(d.amount, Decimal::from(120));
    assert!(!d.is_paid);
    assert_eq!(d.description, None);
    assert!(store.budgets().is_empty());
}

#[test]
fn corrupt_blob_is_reported_not_overwritten() {
    let mut blobs = MemoryBlobStore::new();
    blobs.put(BUDGETS_KEY, "{not json").unwrap();
    match Session::open(blobs) {
        Err(Error::Storage(StorageError::Corrupt { key, .. })) => assert_eq!(key, BUDGETS_KEY),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("corrupt blob accepted"),
    }
}

#[test]
fn file_store_survives_reopen() {
    let dir = tempdir().unwrap();
    let first = populated(FileBlobStore::open(dir.path()).unwrap());
    assert!(dir.path().join(format!("{}.json", BUDGETS_KEY)).exists());

    let second = Session::open(FileBlobStore::open(dir.path()).unwrap()).unwrap();
    assert_eq!(second.store(), first.store());
}

#[test]
fn export_then_import_reproduces_the_store() {
    let source = populated(MemoryBlobStore::new());
    let raw = export_backup(source.store(), Utc::now()).unwrap();

    let mut target = Session::open(MemoryBlobStore::new()).unwrap();
    let changes = target.import_backup(&raw).unwrap();
    assert_eq!(
        changes,
        vec![Change::Transactions, Change::Debts, Change::Budgets]
    );
    assert_eq!(target.store(), source.store());
    assert_eq!(&load_store(target.blobs()).unwrap(), source.store());
}

#[test]
fn export_carries_timestamp_and_all_collections() {
    let source = populated(MemoryBlobStore::new());
    let at = Utc.with_ymd_and_hms(2024, 3, 20, 10, 30, 0).unwrap();
    let v: Value = serde_json::from_str(&export_backup(source.store(), at).unwrap()).unwrap();
    assert_eq!(v["exportDate"], "2024-03-20T10:30:00Z");
    assert_eq!(v["transactions"].as_array().unwrap().len(), 2);
    assert_eq!(v["debts"].as_array().unwrap().len(), 1);
    assert_eq!(v["budgets"][0]["category"], "Food");
    assert_eq!(
        backup_file_name(at.date_naive()),
        "rupeewise_backup_2024-03-20.json"
    );
}

#[test]
fn partial_import_leaves_missing_collections_alone() {
    let mut session = populated(MemoryBlobStore::new());
    let before = session.store().clone();
    let changes = session
        .import_backup(r#"{"budgets":[{"category":"Rent","limit":15000}]}"#)
        .unwrap();
    assert_eq!(changes, vec![Change::Budgets]);
    assert_eq!(session.store().transactions(), before.transactions());
    assert_eq!(session.store().debts(), before.debts());
    assert_eq!(session.store().budgets().len(), 1);
    assert_eq!(session.store().budgets()[0].category, "Rent");
}

#[test]
fn invalid_imports_leave_state_untouched() {
    let mut session = populated(MemoryBlobStore::new());
    let before = session.store().clone();

    for bad in [
        "not json at all",
        "[1, 2, 3]",
        "[[],[],[]]",
        "{}",
        r#"{"exportDate":"2024-01-01T00:00:00Z"}"#,
        r#"{"budgets":[{"category":"Food","limit":1},{"category":"Food","limit":2}]}"#,
        r#"{"debts":[{"id":"x","personName":"A","amount":-4,"type":"i_owe"}]}"#,
        r#"{"transactions":[{"id":"x","date":"2024-01-01","description":"a","amount":1,"type":"income","category":"Salary"},{"id":"x","date":"2024-01-02","description":"b","amount":2,"type":"income","category":"Salary"}]}"#,
        r#"{"transactions":[{"id":"x","date":"March 1st","description":"a","amount":1,"type":"income","category":"Salary"}]}"#,
    ] {
        assert!(session.import_backup(bad).is_err(), "accepted: {}", bad);
        assert_eq!(session.store(), &before);
    }
}

#[test]
fn parse_backup_names_the_problem() {
    assert!(matches!(parse_backup("{}"), Err(ImportError::NoCollections)));
    assert!(matches!(
        parse_backup("[[],[],[]]"),
        Err(ImportError::NotAnObject)
    ));
    assert!(matches!(
        parse_backup(
            r#"{"debts":[{"id":"x","personName":"A","amount":"1234.5678901234567891","type":"i_owe"}]}"#
        ),
        Err(ImportError::UnstorableAmount { .. })
    ));
    assert!(matches!(parse_backup("nope"), Err(ImportError::Parse(_))));
    match parse_backup(r#"{"budgets":[{"category":"Food","limit":1},{"category":"Food","limit":2}]}"#) {
        Err(ImportError::DuplicateBudget(cat)) => assert_eq!(cat, "Food"),
        other => panic!("unexpected: {:?}", other.map(|_| ())),
    }
}

#[test]
fn widest_amounts_survive_save_and_backup() {
    let mut session = Session::open(MemoryBlobStore::new()).unwrap();
    for raw in ["1234567890123.45", "9999999999999.99", "0.01", "4.1"] {
        session
            .add_transaction(NewTransaction {
                date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                description: "Transfer".into(),
                amount: Decimal::from_str_exact(raw).unwrap(),
                r#type: TransactionType::Income,
                category: "Other".into(),
            })
            .unwrap();
    }
    let too_precise = session.add_transaction(NewTransaction {
        date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        description: "Transfer".into(),
        amount: Decimal::from_str_exact("12345678901234567.89").unwrap(),
        r#type: TransactionType::Income,
        category: "Other".into(),
    });
    assert!(too_precise.is_err());

    assert_eq!(&load_store(session.blobs()).unwrap(), session.store());

    let raw = export_backup(session.store(), Utc::now()).unwrap();
    let mut restored = Session::open(MemoryBlobStore::new()).unwrap();
    restored.import_backup(&raw).unwrap();
    assert_eq!(restored.store(), session.store());
}
