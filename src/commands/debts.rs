// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{DebtType, DebtUpdate, NewDebt};
use crate::persist::BlobStore;
use crate::session::Session;
use crate::summary::{outstanding_debts, person_netting, settlement_message};
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Result, anyhow};

pub fn handle<B: BlobStore>(session: &mut Session<B>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        Some(("paid", sub)) => toggle_paid(session, sub)?,
        Some(("edit", sub)) => edit(session, sub)?,
        Some(("rm", sub)) => rm(session, sub)?,
        Some(("people", sub)) => people(session, sub)?,
        Some(("share", sub)) => share(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_type(s: &str) -> DebtType {
    match s {
        "owe_me" => DebtType::OweMe,
        _ => DebtType::IOwe,
    }
}

fn add<B: BlobStore>(session: &mut Session<B>, sub: &clap::ArgMatches) -> Result<()> {
    let person_name = sub.get_one::<String>("person").unwrap().to_string();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let r#type = parse_type(sub.get_one::<String>("type").unwrap());
    let description = sub.get_one::<String>("description").cloned();
    let due_date = sub.get_one::<String>("due").map(|s| parse_date(s)).transpose()?;

    let d = session.add_debt(NewDebt {
        person_name,
        description,
        amount,
        r#type,
        due_date,
    })?;
    let direction = match d.r#type {
        DebtType::IOwe => "You owe",
        DebtType::OweMe => "Owed to you by",
    };
    println!(
        "{} {}: {} (id: {})",
        direction,
        d.person_name,
        fmt_money(&d.amount),
        d.id
    );
    Ok(())
}

fn list<B: BlobStore>(session: &Session<B>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let debts = session.store().debts();
    if maybe_print_json(json_flag, jsonl_flag, &debts)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = debts
        .iter()
        .map(|d| {
            vec![
                d.person_name.clone(),
                d.r#type.to_string(),
                fmt_money(&d.amount),
                d.description.clone().unwrap_or_default(),
                d.due_date.map(|x| x.to_string()).unwrap_or_default(),
                if d.is_paid { "yes" } else { "no" }.to_string(),
                d.id.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Person", "Type", "Amount", "Description", "Due", "Paid", "ID"],
            rows
        )
    );
    let totals = outstanding_debts(debts);
    println!(
        "Total I need to pay: {}   Total others owe me: {}",
        fmt_money(&totals.total_i_owe),
        fmt_money(&totals.total_owed_to_me)
    );
    Ok(())
}

fn toggle_paid<B: BlobStore>(session: &mut Session<B>, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    if !session.toggle_debt_paid(id)? {
        println!("No debt with id {}", id);
        return Ok(());
    }
    let paid = session
        .store()
        .debts()
        .iter()
        .find(|d| d.id == id)
        .is_some_and(|d| d.is_paid);
    println!(
        "Debt {} marked {}",
        id,
        if paid { "paid" } else { "unpaid" }
    );
    Ok(())
}

fn edit<B: BlobStore>(session: &mut Session<B>, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let update = DebtUpdate {
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_decimal(s))
            .transpose()?,
        r#type: sub.get_one::<String>("type").map(|s| parse_type(s)),
        description: sub.get_one::<String>("description").cloned(),
        due_date: if sub.get_flag("clear-due") {
            Some(None)
        } else {
            sub.get_one::<String>("due")
                .map(|s| parse_date(s).map(Some))
                .transpose()?
        },
    };
    if update.is_empty() {
        return Err(anyhow!(
            "Nothing to change; pass --amount, --type, --description, --due or --clear-due"
        ));
    }
    if session.edit_debt(id, update)? {
        println!("Updated debt {}", id);
    } else {
        println!("No debt with id {}", id);
    }
    Ok(())
}

fn rm<B: BlobStore>(session: &mut Session<B>, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    if session.delete_debt(id)? {
        println!("Removed debt {}", id);
    } else {
        println!("No debt with id {}", id);
    }
    Ok(())
}

fn people<B: BlobStore>(session: &Session<B>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let balances = person_netting(session.store().debts());
    if !maybe_print_json(json_flag, jsonl_flag, &balances)? {
        let rows: Vec<Vec<String>> = balances
            .iter()
            .map(|b| {
                let status = if b.is_settled {
                    "All settled up!".to_string()
                } else {
                    fmt_money(&b.net)
                };
                vec![
                    b.person.clone(),
                    fmt_money(&b.i_owe),
                    fmt_money(&b.owes_me),
                    status,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Person", "I owe", "Owes me", "Net"], rows)
        );
    }
    Ok(())
}

fn share<B: BlobStore>(session: &Session<B>, sub: &clap::ArgMatches) -> Result<()> {
    let person = sub.get_one::<String>("person").unwrap().trim();
    let balances = person_netting(session.store().debts());
    let balance = balances
        .iter()
        .find(|b| b.person == person)
        .ok_or_else(|| anyhow!("No debts recorded for '{}'", person))?;
    println!("{}", settlement_message(balance));
    Ok(())
}
