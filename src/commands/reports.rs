// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::persist::BlobStore;
use crate::session::Session;
use crate::summary::{category_breakdown, global_summary, month_view, overview_bars};
use crate::utils::{
    current_month, fmt_money, fmt_percent, maybe_print_json, parse_month, pretty_table,
};
use anyhow::Result;

pub fn handle<B: BlobStore>(session: &Session<B>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(session, sub)?,
        Some(("breakdown", sub)) => breakdown(session, sub)?,
        Some(("month", sub)) => month(session, sub)?,
        Some(("overview", sub)) => overview(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary<B: BlobStore>(session: &Session<B>, sub: &clap::ArgMatches) -> Result<()> {
    let s = global_summary(session.store().transactions());
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        let data = vec![
            vec!["Total Income".to_string(), fmt_money(&s.total_income)],
            vec!["Total Expense".to_string(), fmt_money(&s.total_expense)],
            vec!["Balance".to_string(), fmt_money(&s.balance)],
            vec!["Savings Rate".to_string(), fmt_percent(&s.savings_rate)],
        ];
        println!("{}", pretty_table(&["Metric", "Value"], data));
    }
    Ok(())
}

fn breakdown<B: BlobStore>(session: &Session<B>, sub: &clap::ArgMatches) -> Result<()> {
    let items = category_breakdown(session.store().transactions());
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
        let data = items
            .iter()
            .map(|c| vec![c.category.clone(), fmt_money(&c.total_amount)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], data));
    }
    Ok(())
}

fn month<B: BlobStore>(session: &Session<B>, sub: &clap::ArgMatches) -> Result<()> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => current_month(),
    };
    let store = session.store();
    let view = month_view(store.transactions(), store.debts(), &month);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
        return Ok(());
    }
    let totals = vec![
        vec!["Income".to_string(), fmt_money(&view.income)],
        vec!["Expense".to_string(), fmt_money(&view.expense)],
        vec!["Savings".to_string(), fmt_money(&view.savings)],
        vec!["I owe (all time)".to_string(), fmt_money(&view.debts.total_i_owe)],
        vec![
            "Owed to me (all time)".to_string(),
            fmt_money(&view.debts.total_owed_to_me),
        ],
    ];
    println!("{}", month);
    println!("{}", pretty_table(&["Metric", "Value"], totals));
    let by_cat = view
        .expenses_by_category
        .iter()
        .map(|(c, v)| vec![c.clone(), fmt_money(v)])
        .collect();
    println!("{}", pretty_table(&["Category", "Spent"], by_cat));
    Ok(())
}

fn overview<B: BlobStore>(session: &Session<B>, sub: &clap::ArgMatches) -> Result<()> {
    let bars = overview_bars(&global_summary(session.store().transactions()));
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &bars)? {
        let data = bars
            .iter()
            .map(|b| vec![b.name.to_string(), fmt_money(&b.value)])
            .collect();
        println!("{}", pretty_table(&["", "Amount"], data));
    }
    Ok(())
}
