// Copyright (c) 2026 Tallybook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn user_arg() -> Arg {
    Arg::new("user")
        .long("user")
        .required(true)
        .value_name("NAME")
        .help("Name of the acting user")
}

fn id_arg(help: &'static str) -> Arg {
    Arg::new("id")
        .required(true)
        .value_parser(value_parser!(i64))
        .help(help)
}

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
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("tallybook")
        .about("Double-entry personal bookkeeping: account groups, master accounts, balanced transaction lines")
        .version(clap::crate_version!())
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Initialize the database and seed the root categories"))
        .subcommand(
            Command::new("user")
                .about("Manage users")
                .subcommand(
                    Command::new("add")
                        .about("Register a user")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("admin")
                                .long("admin")
                                .action(ArgAction::SetTrue)
                                .help("Register as an administrator"),
                        ),
                )
                .subcommand(json_flags(Command::new("list").about("List users"))),
        )
        .subcommand(
            Command::new("group")
                .about("Manage account groups")
                .subcommand(
                    Command::new("add")
                        .about("Create a group under a root category or a parent group")
                        .arg(user_arg())
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .value_name("NAME")
                                .help("Root category to anchor to (e.g. Assets)"),
                        )
                        .arg(
                            Arg::new("parent")
                                .long("parent")
                                .value_name("GROUP_ID")
                                .value_parser(value_parser!(i64))
                                .conflicts_with("category")
                                .help("Parent group to nest under"),
                        ),
                )
                .subcommand(
                    Command::new("rename")
                        .about("Rename a group")
                        .arg(user_arg())
                        .arg(id_arg("Group id"))
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a group and everything beneath it")
                        .arg(user_arg())
                        .arg(id_arg("Group id")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List categories and the user's groups")
                        .arg(user_arg()),
                )),
        )
        .subcommand(
            Command::new("account")
                .about("Manage master accounts")
                .subcommand(
                    Command::new("add")
                        .about("Create a master account in a group")
                        .arg(user_arg())
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("group")
                                .long("group")
                                .required(true)
                                .value_name("GROUP_ID")
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("opening")
                                .long("opening")
                                .required(true)
                                .value_name("AMOUNT")
                                .help("Opening amount, e.g. 1000.00"),
                        ),
                )
                .subcommand(
                    Command::new("update")
                        .about("Update an account's name, group, and opening amount")
                        .arg(user_arg())
                        .arg(id_arg("Account id"))
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("group")
                                .long("group")
                                .required(true)
                                .value_name("GROUP_ID")
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("opening")
                                .long("opening")
                                .required(true)
                                .value_name("AMOUNT"),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete an account and its lines")
                        .arg(user_arg())
                        .arg(id_arg("Account id")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List the user's accounts with balances")
                        .arg(user_arg()),
                )),
        )
        .subcommand(
            Command::new("tx")
                .about("Manage transactions")
                .subcommand(
                    Command::new("add")
                        .about("Create a transaction")
                        .arg(user_arg())
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .required(true)
                                .value_name("YYYY-MM-DD"),
                        )
                        .arg(Arg::new("desc").long("desc").required(true)),
                )
                .subcommand(
                    Command::new("update")
                        .about("Update a transaction's date and description")
                        .arg(user_arg())
                        .arg(id_arg("Transaction id"))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .required(true)
                                .value_name("YYYY-MM-DD"),
                        )
                        .arg(Arg::new("desc").long("desc").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction and its lines")
                        .arg(user_arg())
                        .arg(id_arg("Transaction id")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List the user's transactions")
                        .arg(user_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("show")
                        .about("Show a transaction with its lines and totals")
                        .arg(user_arg())
                        .arg(id_arg("Transaction id")),
                )),
        )
        .subcommand(
            Command::new("line")
                .about("Manage transaction lines")
                .subcommand(
                    Command::new("add")
                        .about("Post a debit or credit line against an account")
                        .arg(user_arg())
                        .arg(
                            Arg::new("tx")
                                .long("tx")
                                .required(true)
                                .value_name("TX_ID")
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("account")
                                .long("account")
                                .required(true)
                                .value_name("ACCOUNT_ID")
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .value_name("DEBIT|CREDIT"),
                        )
                        .arg(Arg::new("comment").long("comment")),
                )
                .subcommand(
                    Command::new("update")
                        .about("Change a line's amount, type, comment, or account")
                        .arg(user_arg())
                        .arg(id_arg("Line id"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("type").long("type").value_name("DEBIT|CREDIT"))
                        .arg(Arg::new("comment").long("comment"))
                        .arg(
                            Arg::new("account")
                                .long("account")
                                .value_name("ACCOUNT_ID")
                                .value_parser(value_parser!(i64)),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a line")
                        .arg(user_arg())
                        .arg(id_arg("Line id")),
                ),
        )
}
