// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{INCOME_ONLY_CATEGORIES, TRANSACTION_CATEGORIES};
use crate::summary::budgetable_categories;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        let names: Vec<&str> = if sub.get_flag("budgetable") {
            budgetable_categories()
        } else {
            TRANSACTION_CATEGORIES.to_vec()
        };
        let data = names
            .into_iter()
            .map(|c| {
                let kind = if INCOME_ONLY_CATEGORIES.contains(&c) {
                    "income only"
                } else {
                    ""
                };
                vec![c.to_string(), kind.to_string()]
            })
            .collect();
        println!("{}", pretty_table(&["Category", ""], data));
    }
    Ok(())
}
