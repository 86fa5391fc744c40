// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rupeewise::models::DebtType;
use rupeewise::persist::MemoryBlobStore;
use rupeewise::session::Session;
use rupeewise::{cli, commands::debts};
use rust_decimal::Decimal;

fn run(session: &mut Session<MemoryBlobStore>, args: &[&str]) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from(args);
    if let Some(("debt", debt_m)) = matches.subcommand() {
        debts::handle(session, debt_m)
    } else {
        panic!("no debt subcommand");
    }
}

fn setup() -> (Session<MemoryBlobStore>, String) {
    let mut session = Session::open(MemoryBlobStore::new()).unwrap();
    run(
        &mut session,
        &[
            "rupeewise", "debt", "add", "-p", "Asha", "-a", "750", "--type", "owe_me", "-d",
            "Train tickets", "--due", "2025-03-01",
        ],
    )
    .unwrap();
    let id = session.store().debts()[0].id.clone();
    (session, id)
}

#[test]
fn add_parses_type_and_due_date() {
    let (mut session, _) = setup();
    run(
        &mut session,
        &["rupeewise", "debt", "add", "-p", "Ravi", "-a", "120"],
    )
    .unwrap();

    let debts = session.store().debts();
    assert_eq!(debts.len(), 2);
    assert_eq!(debts[0].r#type, DebtType::OweMe);
    assert_eq!(debts[0].amount, Decimal::from(750));
    assert_eq!(debts[0].description.as_deref(), Some("Train tickets"));
    assert_eq!(debts[0].due_date, NaiveDate::from_ymd_opt(2025, 3, 1));
    assert_eq!(debts[1].r#type, DebtType::IOwe);
    assert_eq!(debts[1].due_date, None);
    assert!(!debts[1].is_paid);
}

#[test]
fn add_rejects_bad_due_date_and_keeps_state() {
    let (mut session, _) = setup();
    let err = run(
        &mut session,
        &["rupeewise", "debt", "add", "-p", "Ravi", "-a", "120", "--due", "01/03/2025"],
    );
    assert!(err.is_err());
    assert_eq!(session.store().debts().len(), 1);
}

#[test]
fn paid_toggles_back_and_forth() {
    let (mut session, id) = setup();
    run(&mut session, &["rupeewise", "debt", "paid", "--id", &id]).unwrap();
    assert!(session.store().debts()[0].is_paid);
    run(&mut session, &["rupeewise", "debt", "paid", "--id", &id]).unwrap();
    assert!(!session.store().debts()[0].is_paid);
    run(&mut session, &["rupeewise", "debt", "paid", "--id", "missing"]).unwrap();
}

#[test]
fn edit_changes_fields_and_blank_description_clears() {
    let (mut session, id) = setup();
    run(
        &mut session,
        &[
            "rupeewise", "debt", "edit", "--id", &id, "--amount", "500", "--type", "i_owe",
            "--description", "  ",
        ],
    )
    .unwrap();

    let d = &session.store().debts()[0];
    assert_eq!(d.amount, Decimal::from(500));
    assert_eq!(d.r#type, DebtType::IOwe);
    assert_eq!(d.description, None);
    assert_eq!(d.due_date, NaiveDate::from_ymd_opt(2025, 3, 1));
    assert_eq!(d.person_name, "Asha");
}

#[test]
fn edit_without_fields_is_an_error() {
    let (mut session, id) = setup();
    let before = session.store().clone();
    let err = run(&mut session, &["rupeewise", "debt", "edit", "--id", &id]).unwrap_err();
    assert!(err.to_string().contains("Nothing to change"));
    assert_eq!(session.store(), &before);
}

#[test]
fn edit_clear_due_removes_the_date() {
    let (mut session, id) = setup();
    run(&mut session, &["rupeewise", "debt", "edit", "--id", &id, "--clear-due"]).unwrap();
    assert_eq!(session.store().debts()[0].due_date, None);

    run(
        &mut session,
        &["rupeewise", "debt", "edit", "--id", &id, "--due", "2025-04-15"],
    )
    .unwrap();
    assert_eq!(
        session.store().debts()[0].due_date,
        NaiveDate::from_ymd_opt(2025, 4, 15)
    );

    let both = cli::build_cli().try_get_matches_from([
        "rupeewise",
        "debt",
        "edit",
        "--id",
        id.as_str(),
        "--due",
        "2025-04-15",
        "--clear-due",
    ]);
    assert!(both.is_err());
}

#[test]
fn rm_removes_only_known_ids() {
    let (mut session, id) = setup();
    run(&mut session, &["rupeewise", "debt", "rm", "--id", "missing"]).unwrap();
    assert_eq!(session.store().debts().len(), 1);
    run(&mut session, &["rupeewise", "debt", "rm", "--id", &id]).unwrap();
    assert!(session.store().debts().is_empty());
}

#[test]
fn share_requires_a_known_person() {
    let (mut session, _) = setup();
    run(&mut session, &["rupeewise", "debt", "share", "-p", "Asha"]).unwrap();
    let err = run(&mut session, &["rupeewise", "debt", "share", "-p", "Nobody"]).unwrap_err();
    assert!(err.to_string().contains("Nobody"));
}

#[test]
fn people_and_list_render() {
    let (mut session, _) = setup();
    run(&mut session, &["rupeewise", "debt", "people", "--json"]).unwrap();
    run(&mut session, &["rupeewise", "debt", "list"]).unwrap();
}
