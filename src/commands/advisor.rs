// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::advisor::{AdviceBackend, analyze_finances};
use crate::persist::BlobStore;
use crate::session::Session;
use anyhow::{Result, anyhow};

pub fn handle<B: BlobStore>(
    session: &Session<B>,
    backend: &dyn AdviceBackend,
    m: &clap::ArgMatches,
) -> Result<()> {
    let store = session.store();
    if store.transactions().is_empty() && store.debts().is_empty() {
        return Err(anyhow!("Nothing to analyze yet; add transactions or debts first"));
    }
    let period = match m.get_one::<String>("period") {
        Some(p) => p.trim().to_string(),
        None => chrono::Local::now().format("%B %Y").to_string(),
    };
    let text = analyze_finances(backend, store.transactions(), store.debts(), &period);
    println!("{}", text);
    Ok(())
}
