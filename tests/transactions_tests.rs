// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rupeewise::persist::MemoryBlobStore;
use rupeewise::session::Session;
use rupeewise::{cli, commands::transactions};

fn run(session: &mut Session<MemoryBlobStore>, args: &[&str]) {
    let matches = cli::build_cli().get_matches_from(args);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        transactions::handle(session, tx_m).unwrap();
    } else {
        panic!("no tx subcommand");
    }
}

fn setup() -> Session<MemoryBlobStore> {
    let mut session = Session::open(MemoryBlobStore::new()).unwrap();
    for i in 1..=3 {
        let date = format!("2025-01-0{}", i);
        run(
            &mut session,
            &[
                "rupeewise", "tx", "add", "--date", &date, "-d", "Snacks", "-a", "10", "-c",
                "Food",
            ],
        );
    }
    run(
        &mut session,
        &[
            "rupeewise", "tx", "add", "--date", "2025-02-01", "-d", "Salary", "-a", "5000",
            "--type", "income", "-c", "Salary",
        ],
    );
    session
}

#[test]
fn add_parses_flags_into_a_record() {
    let session = setup();
    let txs = session.store().transactions();
    assert_eq!(txs.len(), 4);
    assert_eq!(txs[3].category, "Salary");
    assert_eq!(txs[3].r#type.as_str(), "income");
    assert_eq!(txs[0].date.to_string(), "2025-01-01");
}

#[test]
fn list_limit_respected() {
    let session = setup();
    let matches = cli::build_cli().get_matches_from(["rupeewise", "tx", "list", "--limit", "2"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            let rows = transactions::query_rows(session.store().transactions(), list_m).unwrap();
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].date.to_string(), "2025-02-01");
            assert_eq!(rows[1].date.to_string(), "2025-01-03");
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn list_filters_by_range_and_month() {
    let session = setup();
    let matches = cli::build_cli().get_matches_from([
        "rupeewise", "tx", "list", "--from", "2025-01-02", "--month", "2025-01",
    ]);
    let list_m = matches
        .subcommand_matches("tx")
        .and_then(|m| m.subcommand_matches("list"))
        .unwrap();
    let rows = transactions::query_rows(session.store().transactions(), list_m).unwrap();
    let dates: Vec<String> = rows.iter().map(|t| t.date.to_string()).collect();
    assert_eq!(dates, vec!["2025-01-03", "2025-01-02"]);
}

#[test]
fn rm_unknown_id_is_not_an_error() {
    let mut session = setup();
    let before = session.store().clone();
    run(&mut session, &["rupeewise", "tx", "rm", "--id", "does-not-exist"]);
    assert_eq!(session.store(), &before);

    let id = before.transactions()[0].id.clone();
    run(&mut session, &["rupeewise", "tx", "rm", "--id", &id]);
    assert_eq!(session.store().transactions().len(), 3);
}

#[test]
fn add_rejects_negative_amount() {
    let mut session = Session::open(MemoryBlobStore::new()).unwrap();
    let matches = cli::build_cli().get_matches_from([
        "rupeewise", "tx", "add", "-d", "Refund", "--amount=-5",
    ]);
    let tx_m = matches.subcommand_matches("tx").unwrap();
    assert!(transactions::handle(&mut session, tx_m).is_err());
    assert!(session.store().transactions().is_empty());
}
