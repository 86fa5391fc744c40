// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rupeewise::models::{NewTransaction, TransactionType};
use rupeewise::persist::MemoryBlobStore;
use rupeewise::session::Session;
use rupeewise::{cli, commands::exporter};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tempfile::tempdir;

fn session_with_one() -> Session<MemoryBlobStore> {
    let mut session = Session::open(MemoryBlobStore::new()).unwrap();
    session
        .add_transaction(NewTransaction {
            date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            description: "Corner Shop".into(),
            amount: Decimal::from_str_exact("12.34").unwrap(),
            r#type: TransactionType::Expense,
            category: "Shopping".into(),
        })
        .unwrap();
    session
}

fn export(session: &Session<MemoryBlobStore>, args: &[&str]) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from(args);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(session, export_m)
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_transactions_streams_pretty_json() {
    let session = session_with_one();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    export(
        &session,
        &["rupeewise", "export", "transactions", "--format", "json", "--out", &out_str],
    )
    .unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "date": "2025-01-02",
                "description": "Corner Shop",
                "type": "expense",
                "category": "Shopping",
                "amount": "12.34"
            }
        ])
    );
}

#[test]
fn export_transactions_writes_csv_by_default() {
    let session = session_with_one();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");
    let out_str = out_path.to_string_lossy().to_string();

    export(&session, &["rupeewise", "export", "transactions", "--out", &out_str]).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "date,description,type,category,amount");
    assert_eq!(lines[1], "2025-01-02,Corner Shop,expense,Shopping,12.34");
}

#[test]
fn export_transactions_rejects_unknown_format() {
    let session = session_with_one();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    assert!(
        export(
            &session,
            &["rupeewise", "export", "transactions", "--format", "xml", "--out", &out_str],
        )
        .is_err()
    );
    assert!(!out_path.exists());
}

#[test]
fn export_backup_writes_all_collections() {
    let mut session = session_with_one();
    session.upsert_budget("Shopping", Decimal::from(3000)).unwrap();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("backup.json");
    let out_str = out_path.to_string_lossy().to_string();

    export(&session, &["rupeewise", "export", "backup", "--out", &out_str]).unwrap();

    let v: Value = serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(v["transactions"][0]["description"], "Corner Shop");
    assert_eq!(v["debts"], json!([]));
    assert_eq!(v["budgets"][0]["limit"].as_f64(), Some(3000.0));
    assert!(v["exportDate"].is_string());
}
