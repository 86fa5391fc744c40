// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TRANSACTION_CATEGORIES;
use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id").long("id").required(true).help("Record id")
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .help("Month as YYYY-MM (default: current month)")
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Income and expense transactions")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Record a transaction")
                .arg(Arg::new("date").long("date").help("YYYY-MM-DD (default: today)"))
                .arg(Arg::new("description").long("description").short('d').required(true))
                .arg(Arg::new("amount").long("amount").short('a').required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["income", "expense"])
                        .default_value("expense"),
                )
                .arg(
                    Arg::new("category")
                        .long("category")
                        .short('c')
                        .value_parser(TRANSACTION_CATEGORIES)
                        .default_value(TRANSACTION_CATEGORIES[0]),
                ),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List transactions, newest first")
                .arg(Arg::new("from").long("from").help("Earliest date, YYYY-MM-DD"))
                .arg(Arg::new("to").long("to").help("Latest date, YYYY-MM-DD"))
                .arg(Arg::new("month").long("month").help("Only this YYYY-MM"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(Command::new("rm").about("Delete a transaction").arg(id_arg()))
}

fn debt_cmd() -> Command {
    Command::new("debt")
        .about("Money owed between you and other people")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Record a debt")
                .arg(Arg::new("person").long("person").short('p').required(true))
                .arg(Arg::new("amount").long("amount").short('a').required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["i_owe", "owe_me"])
                        .default_value("i_owe"),
                )
                .arg(Arg::new("description").long("description").short('d'))
                .arg(Arg::new("due").long("due").help("Due date, YYYY-MM-DD")),
        )
        .subcommand(json_flags(Command::new("list").about("List all debts")))
        .subcommand(
            Command::new("paid")
                .about("Toggle the paid flag of a debt")
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("edit")
                .about("Change amount, type, description or due date")
                .arg(id_arg())
                .arg(Arg::new("amount").long("amount"))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["i_owe", "owe_me"]),
                )
                .arg(Arg::new("description").long("description"))
                .arg(Arg::new("due").long("due"))
                .arg(
                    Arg::new("clear-due")
                        .long("clear-due")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("due")
                        .help("Remove the due date"),
                ),
        )
        .subcommand(Command::new("rm").about("Delete a debt").arg(id_arg()))
        .subcommand(json_flags(
            Command::new("people").about("Outstanding balance per person"),
        ))
        .subcommand(
            Command::new("share")
                .about("Print a settle-up message for one person")
                .arg(Arg::new("person").long("person").short('p').required(true)),
        )
}

fn budget_cmd() -> Command {
    Command::new("budget")
        .about("Monthly spending limits per category")
        .subcommand_required(true)
        .subcommand(
            Command::new("set")
                .about("Set (or replace) the limit for a category")
                .arg(Arg::new("category").long("category").short('c').required(true))
                .arg(Arg::new("limit").long("limit").short('l').required(true)),
        )
        .subcommand(json_flags(Command::new("list").about("List limits")))
        .subcommand(json_flags(
            Command::new("status")
                .about("Spend against every limit for a month")
                .arg(month_arg())
                .arg(
                    Arg::new("offset")
                        .long("offset")
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(i32))
                        .help("Shift the month by this many months"),
                ),
        ))
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Summaries")
        .subcommand_required(true)
        .subcommand(json_flags(
            Command::new("summary").about("All-time income, expense, balance and savings rate"),
        ))
        .subcommand(json_flags(
            Command::new("breakdown").about("All-time spend per category"),
        ))
        .subcommand(json_flags(
            Command::new("month")
                .about("Income, expense and spend per category for one month")
                .arg(month_arg()),
        ))
        .subcommand(json_flags(
            Command::new("overview").about("Income, expense and savings bars"),
        ))
}

pub fn build_cli() -> Command {
    Command::new("rupeewise")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Track income, expenses, debts and budgets locally")
        .subcommand(Command::new("init").about("Create the data directory"))
        .subcommand(tx_cmd())
        .subcommand(debt_cmd())
        .subcommand(budget_cmd())
        .subcommand(report_cmd())
        .subcommand(
            Command::new("export")
                .about("Write data to a file")
                .subcommand_required(true)
                .subcommand(
                    Command::new("backup")
                        .about("Full backup of transactions, debts and budgets")
                        .arg(Arg::new("out").long("out").help("Output path")),
                )
                .subcommand(
                    Command::new("transactions")
                        .about("Transactions only, as CSV or JSON")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Restore data from a backup file")
                .subcommand_required(true)
                .subcommand(
                    Command::new("backup")
                        .about("Replace every collection present in the file")
                        .arg(Arg::new("path").long("path").required(true)),
                ),
        )
        .subcommand(
            Command::new("advise")
                .about("Ask the AI advisor for feedback on your finances")
                .arg(
                    Arg::new("period")
                        .long("period")
                        .help("Period label for the advisor (default: current month)"),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Transaction categories")
                .subcommand_required(true)
                .subcommand(
                    Command::new("list").arg(
                        Arg::new("budgetable")
                            .long("budgetable")
                            .action(ArgAction::SetTrue)
                            .help("Only categories that can carry a budget"),
                    ),
                ),
        )
}
