// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::persist::BlobStore;
use crate::session::Session;
use crate::summary::{BudgetProgress, budget_report, month_view, shift_month};
use crate::utils::{
    current_month, fmt_money, fmt_percent, maybe_print_json, parse_decimal, parse_month,
    pretty_table,
};
use anyhow::{Context, Result};

pub fn handle<B: BlobStore>(session: &mut Session<B>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(session, sub)?,
        Some(("list", sub)) => list(session, sub)?,
        Some(("status", sub)) => status(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn set<B: BlobStore>(session: &mut Session<B>, sub: &clap::ArgMatches) -> Result<()> {
    let cat = sub.get_one::<String>("category").unwrap().trim();
    let limit = parse_decimal(sub.get_one::<String>("limit").unwrap())?;
    session.upsert_budget(cat, limit)?;
    println!("Budget set for {} = {}", cat, fmt_money(&limit));
    Ok(())
}

fn list<B: BlobStore>(session: &Session<B>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let budgets = session.store().budgets();
    if !maybe_print_json(json_flag, jsonl_flag, &budgets)? {
        let data = budgets
            .iter()
            .map(|b| vec![b.category.clone(), fmt_money(&b.limit)])
            .collect();
        println!("{}", pretty_table(&["Category", "Limit"], data));
    }
    Ok(())
}

/// The month a status request refers to, after applying `--offset`.
pub fn resolve_month(sub: &clap::ArgMatches) -> Result<String> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => current_month(),
    };
    match sub.get_one::<i32>("offset") {
        Some(&offset) => shift_month(&month, offset)
            .with_context(|| format!("Cannot shift {} by {} months", month, offset)),
        None => Ok(month),
    }
}

pub fn status_rows<B: BlobStore>(session: &Session<B>, month: &str) -> Vec<BudgetProgress> {
    let store = session.store();
    let view = month_view(store.transactions(), store.debts(), month);
    budget_report(&view, store.budgets())
}

fn status<B: BlobStore>(session: &Session<B>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = resolve_month(sub)?;
    let rows = status_rows(session, &month);
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data = rows
            .iter()
            .map(|p| {
                let limit = if p.limit.is_zero() {
                    "No limit".to_string()
                } else {
                    fmt_money(&p.limit)
                };
                let flag = if p.is_over_budget { "OVER" } else { "" };
                vec![
                    p.category.clone(),
                    limit,
                    fmt_money(&p.spent),
                    fmt_percent(&p.percentage),
                    flag.to_string(),
                ]
            })
            .collect();
        println!("Budget status for {}", month);
        println!(
            "{}",
            pretty_table(&["Category", "Limit", "Spent", "Used", ""], data)
        );
    }
    Ok(())
}
