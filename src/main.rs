// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use rupeewise::advisor::GeminiBackend;
use rupeewise::config::Config;
use rupeewise::persist::FileBlobStore;
use rupeewise::session::Session;
use rupeewise::{cli, commands};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    // Commands that need no saved data run before the data dir is opened.
    match matches.subcommand() {
        Some(("category", sub)) => return commands::categories::handle(sub),
        None => {
            cli::build_cli().print_help()?;
            println!();
            return Ok(());
        }
        Some(_) => {}
    }

    let config = Config::from_env()?;
    let blobs = FileBlobStore::open(&config.data_dir)
        .with_context(|| format!("Open data dir {}", config.data_dir.display()))?;
    let mut session = Session::open(blobs).context("Load saved data")?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Data directory ready at {}", session.blobs().dir().display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut session, sub)?,
        Some(("debt", sub)) => commands::debts::handle(&mut session, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut session, sub)?,
        Some(("report", sub)) => commands::reports::handle(&session, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&session, sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut session, sub)?,
        Some(("advise", sub)) => {
            let backend = GeminiBackend::new(config.api_key.clone(), config.model.clone());
            commands::advisor::handle(&session, &backend, sub)?
        }
        _ => {}
    }
    Ok(())
}
