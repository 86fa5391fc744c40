// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::persist::BlobStore;
use crate::session::Session;
use crate::store::Change;
use anyhow::{Context, Result};

pub fn handle<B: BlobStore>(session: &mut Session<B>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("backup", sub)) => import_backup(session, sub),
        _ => Ok(()),
    }
}

fn import_backup<B: BlobStore>(session: &mut Session<B>, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let raw = std::fs::read_to_string(path).with_context(|| format!("Open backup {}", path))?;
    let changes = session
        .import_backup(&raw)
        .with_context(|| format!("Error importing data from {}", path))?;
    let names: Vec<&str> = changes
        .iter()
        .map(|c| match c {
            Change::Transactions => "transactions",
            Change::Debts => "debts",
            Change::Budgets => "budgets",
        })
        .collect();
    println!("Data imported successfully ({}) from {}", names.join(", "), path);
    Ok(())
}
