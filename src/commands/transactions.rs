// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{NewTransaction, Transaction, TransactionType};
use crate::persist::BlobStore;
use crate::session::Session;
use crate::summary::{filter_by_date_range, in_month};
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, parse_month, pretty_table};
use anyhow::Result;

pub fn handle<B: BlobStore>(session: &mut Session<B>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        Some(("rm", sub)) => rm(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_type(s: &str) -> TransactionType {
    match s {
        "income" => TransactionType::Income,
        _ => TransactionType::Expense,
    }
}

fn add<B: BlobStore>(session: &mut Session<B>, sub: &clap::ArgMatches) -> Result<()> {
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => chrono::Local::now().date_naive(),
    };
    let description = sub.get_one::<String>("description").unwrap().to_string();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let r#type = parse_type(sub.get_one::<String>("type").unwrap());
    let category = sub.get_one::<String>("category").unwrap().to_string();

    let t = session.add_transaction(NewTransaction {
        date,
        description,
        amount,
        r#type,
        category,
    })?;
    println!(
        "Recorded {} {} on {} for '{}' [{}] (id: {})",
        t.r#type,
        fmt_money(&t.amount),
        t.date,
        t.description,
        t.category,
        t.id
    );
    Ok(())
}

/// Transactions matching the list filters, newest first.
pub fn query_rows<'a>(
    transactions: &'a [Transaction],
    sub: &clap::ArgMatches,
) -> Result<Vec<&'a Transaction>> {
    let from = sub.get_one::<String>("from").map(|s| parse_date(s)).transpose()?;
    let to = sub.get_one::<String>("to").map(|s| parse_date(s)).transpose()?;
    let month = sub
        .get_one::<String>("month")
        .map(|s| parse_month(s))
        .transpose()?;

    let mut rows = filter_by_date_range(transactions, from, to);
    if let Some(month) = month {
        rows.retain(|t| in_month(t, &month));
    }
    // Latest first; same-day entries come out in reverse insertion order.
    rows.sort_by_key(|t| t.date);
    rows.reverse();
    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    Ok(rows)
}

fn list<B: BlobStore>(session: &Session<B>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(session.store().transactions(), sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.date.to_string(),
                    t.description.clone(),
                    t.r#type.to_string(),
                    t.category.clone(),
                    fmt_money(&t.amount),
                    t.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Description", "Type", "Category", "Amount", "ID"],
                rows,
            )
        );
    }
    Ok(())
}

fn rm<B: BlobStore>(session: &mut Session<B>, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    if session.delete_transaction(id)? {
        println!("Removed transaction {}", id);
    } else {
        println!("No transaction with id {}", id);
    }
    Ok(())
}
