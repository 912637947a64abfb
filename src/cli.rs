// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn student_arg() -> Arg {
    Arg::new("student")
        .long("student")
        .required(true)
        .value_name("ID")
        .help("Student id")
}

fn reason_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("payment")
            .long("payment")
            .required(true)
            .value_name("ID")
            .help("Payment id from the payment history"),
    )
    .arg(student_arg())
    .arg(
        Arg::new("reason")
            .long("reason")
            .required(true)
            .value_name("ID")
            .help("Reversal reason id (see `config reasons`)"),
    )
    .arg(
        Arg::new("details")
            .long("details")
            .value_name("TEXT")
            .help("Free text detail for the reversal"),
    )
}

pub fn build_cli() -> Command {
    Command::new("feeclip")
        .version(crate_version!())
        .about("School fee collection console: month-wise payments and reversals")
        .subcommand_required(false)
        .arg(
            Arg::new("session")
                .long("session")
                .global(true)
                .value_name("YYYY-YY")
                .help("Session year for this invocation, e.g. 2025-26"),
        )
        .subcommand(
            json_flags(
                Command::new("students")
                    .about("Student fee collection summary")
                    .arg(
                        Arg::new("class")
                            .long("class")
                            .value_name("NAME")
                            .help("Only students of this class"),
                    ),
            )
            .subcommand(
                Command::new("enable-tracking")
                    .about("Enable month-by-month fee tracking for a student")
                    .arg(student_arg()),
            ),
        )
        .subcommand(json_flags(
            Command::new("months")
                .about("Unpaid months for a student")
                .arg(student_arg()),
        ))
        .subcommand(
            Command::new("pay")
                .about("Record a payment against selected months")
                .arg(student_arg())
                .arg(
                    Arg::new("months")
                        .long("months")
                        .required(true)
                        .value_name("LIST")
                        .help("Comma separated month numbers, e.g. 4,5"),
                )
                .arg(
                    Arg::new("method")
                        .long("method")
                        .required(true)
                        .value_name("ID")
                        .help("Payment method id (see `config methods`)"),
                )
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .value_name("DECIMAL")
                        .help("Override the amount computed from the selected months"),
                )
                .arg(
                    Arg::new("txn")
                        .long("txn")
                        .value_name("REF")
                        .help("Transaction reference"),
                )
                .arg(
                    Arg::new("remarks")
                        .long("remarks")
                        .value_name("TEXT")
                        .help("Remarks stored with the payment"),
                ),
        )
        .subcommand(json_flags(
            Command::new("history")
                .about("Payment history for a student")
                .arg(student_arg()),
        ))
        .subcommand(
            Command::new("reverse")
                .about("Reverse a recorded payment")
                .subcommand_required(true)
                .subcommand(reason_args(
                    Command::new("full").about("Reverse the whole payment"),
                ))
                .subcommand(
                    reason_args(
                        Command::new("partial").about("Reverse selected month allocations"),
                    )
                    .arg(
                        Arg::new("allocations")
                            .long("allocations")
                            .required(true)
                            .value_name("LIST")
                            .help("Comma separated allocation ids"),
                    ),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Lookups from the configuration service")
                .subcommand_required(true)
                .subcommand(json_flags(
                    Command::new("methods").about("Payment methods"),
                ))
                .subcommand(json_flags(
                    Command::new("reasons").about("Active reversal reasons"),
                )),
        )
        .subcommand(
            Command::new("settings")
                .about("Local console settings")
                .subcommand_required(true)
                .subcommand(Command::new("show").about("Show effective settings"))
                .subcommand(
                    Command::new("set")
                        .about("Store a setting (api_url, session_year, token)")
                        .arg(Arg::new("key").long("key").required(true))
                        .arg(Arg::new("value").long("value").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check configuration and service health"))
}

/// `--session` is global, so read it from the innermost matches that carry it.
pub fn session_override(m: &clap::ArgMatches) -> Option<String> {
    let mut found = m.get_one::<String>("session").cloned();
    let mut cur = m;
    while let Some((_, sub)) = cur.subcommand() {
        if let Some(s) = sub.get_one::<String>("session") {
            found = Some(s.clone());
        }
        cur = sub;
    }
    found
}
