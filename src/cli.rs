// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, Command, value_parser};
use strum::VariantNames;

use crate::models::{Category, Subcategory};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn csv_source_arg() -> Arg {
    Arg::new("csv")
        .long("csv")
        .value_name("FILE")
        .help("Read transactions from this spreadsheet instead of the ledger")
}

fn category_filter_arg() -> Arg {
    Arg::new("category")
        .long("category")
        .short('c')
        .value_name("CATEGORY")
        .action(ArgAction::Append)
        .value_delimiter(',')
        .help("Categories to include (repeatable or comma separated); all when omitted")
}

fn range_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("from")
            .long("from")
            .value_name("YYYY-MM-DD")
            .required(true),
    )
    .arg(
        Arg::new("to")
            .long("to")
            .value_name("YYYY-MM-DD")
            .required(true),
    )
}

pub fn build_cli() -> Command {
    Command::new("spendboard")
        .version(clap::crate_version!())
        .about("Category spending totals and monthly budget status for a personal ledger")
        .arg(
            Arg::new("db")
                .long("db")
                .value_name("PATH")
                .env("SPENDBOARD_DB")
                .global(true)
                .help("Ledger database path"),
        )
        .subcommand(
            Command::new("init").about("Create the ledger").arg(
                Arg::new("currency")
                    .long("currency")
                    .value_name("CCY")
                    .help("Currency label shown in reports"),
            ),
        )
        .subcommand(json_args(
            Command::new("categories").about("List categories and their subcategories"),
        ))
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a purchase")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("store").long("store").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .required(true)
                                .ignore_case(true)
                                .value_parser(PossibleValuesParser::new(Category::VARIANTS)),
                        )
                        .arg(
                            Arg::new("subcategory")
                                .long("subcategory")
                                .required(true)
                                .ignore_case(true)
                                .value_parser(PossibleValuesParser::new(Subcategory::VARIANTS)),
                        )
                        .arg(
                            Arg::new("split")
                                .long("split")
                                .action(ArgAction::SetTrue)
                                .help("This row is one half of a divided purchase"),
                        )
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .about("Show raw ledger rows, newest first")
                        .arg(Arg::new("month").long("month").value_name("YYYY-MM"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("subcategory").long("subcategory"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("import")
                .about("Import transactions from a spreadsheet")
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("path")
                                .long("path")
                                .value_name("FILE")
                                .required(true),
                        )
                        .arg(
                            Arg::new("skip_invalid")
                                .long("skip-invalid")
                                .action(ArgAction::SetTrue)
                                .help("Skip rows that do not parse instead of aborting"),
                        ),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export ledger transactions")
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .value_name("csv|json")
                                .default_value("csv"),
                        )
                        .arg(
                            Arg::new("out")
                                .long("out")
                                .value_name("FILE")
                                .required(true),
                        ),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Manage monthly subcategory budgets")
                .subcommand(
                    Command::new("set")
                        .arg(
                            Arg::new("subcategory")
                                .long("subcategory")
                                .required(true)
                                .ignore_case(true)
                                .value_parser(PossibleValuesParser::new(Subcategory::VARIANTS)),
                        )
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(json_args(Command::new("list")))
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("subcategory")
                            .long("subcategory")
                            .required(true),
                    ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Spending reports")
                .subcommand(json_args(range_args(
                    Command::new("categories")
                        .about("Spend per category, highest first")
                        .arg(category_filter_arg())
                        .arg(csv_source_arg()),
                )))
                .subcommand(json_args(
                    Command::new("budget")
                        .about("Spend against budget per subcategory for one month")
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .value_name("YYYY-MM")
                                .required(true),
                        )
                        .arg(
                            Arg::new("all")
                                .long("all")
                                .action(ArgAction::SetTrue)
                                .help("Include budgeted subcategories with no spending"),
                        )
                        .arg(
                            Arg::new("budgets")
                                .long("budgets")
                                .value_name("FILE")
                                .help("JSON budget file to use instead of the ledger's"),
                        )
                        .arg(csv_source_arg()),
                ))
                .subcommand(json_args(range_args(
                    Command::new("monthly")
                        .about("Spend per calendar month")
                        .arg(category_filter_arg())
                        .arg(csv_source_arg()),
                ))),
        )
        .subcommand(
            Command::new("doctor")
                .about("Check the data for rows and budgets that reports leave out")
                .arg(csv_source_arg()),
        )
}
