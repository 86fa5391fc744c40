// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Transaction;
use crate::persist::{BlobStore, backup_file_name, export_backup};
use crate::session::Session;
use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

pub fn handle<B: BlobStore>(session: &Session<B>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("backup", sub)) => export_all(session, sub),
        Some(("transactions", sub)) => export_transactions(session, sub),
        _ => Ok(()),
    }
}

fn export_all<B: BlobStore>(session: &Session<B>, sub: &clap::ArgMatches) -> Result<()> {
    let now = Utc::now();
    let out = match sub.get_one::<String>("out") {
        Some(p) => PathBuf::from(p.trim()),
        None => PathBuf::from(backup_file_name(now.date_naive())),
    };
    let body = export_backup(session.store(), now)?;
    std::fs::write(&out, body).with_context(|| format!("Write backup {}", out.display()))?;
    info!(path = %out.display(), "Backup exported");
    println!("Backup written to {}", out.display());
    Ok(())
}

pub fn write_transactions_csv<W: std::io::Write>(w: W, items: &[Transaction]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(w);
    wtr.write_record(["date", "description", "type", "category", "amount"])?;
    for t in items {
        wtr.write_record([
            t.date.to_string(),
            t.description.clone(),
            t.r#type.to_string(),
            t.category.clone(),
            t.amount.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn export_transactions<B: BlobStore>(session: &Session<B>, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim();
    let items = session.store().transactions();

    match fmt.as_str() {
        "csv" => {
            let file =
                std::fs::File::create(out).with_context(|| format!("Create {}", out))?;
            write_transactions_csv(file, items)?;
        }
        "json" => {
            let rows: Vec<_> = items
                .iter()
                .map(|t| {
                    json!({
                        "date": t.date, "description": t.description, "type": t.r#type,
                        "category": t.category, "amount": t.amount.to_string()
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&rows)?)?;
        }
        _ => return Err(anyhow!("Unknown format: {} (use csv|json)", fmt)),
    }
    info!(path = out, count = items.len(), "Transactions exported");
    println!("Exported transactions to {}", out);
    Ok(())
}
