// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{Call, FakeFeeApi, dec};
use feeclip::config::Config;
use feeclip::notify::{Level, Notification};
use feeclip::{cli, commands};

fn cfg() -> Config {
    Config {
        api_url: "http://localhost:8000/api/v1".into(),
        session_year: "2025-26".into(),
        token: None,
    }
}

fn run(api: &FakeFeeApi, args: &[&str]) -> Vec<Notification> {
    let mut argv = vec!["feeclip"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let mut out = Vec::new();
    let cfg = cfg();
    match matches.subcommand() {
        Some(("pay", sub)) => commands::payments::pay(api, &cfg, sub, &mut out).unwrap(),
        Some(("reverse", sub)) => commands::reversals::handle(api, &cfg, sub, &mut out).unwrap(),
        Some(("students", sub)) => commands::students::handle(api, &cfg, sub, &mut out).unwrap(),
        other => panic!("unexpected command {:?}", other.map(|(n, _)| n)),
    }
    out
}

#[test]
fn pay_command_records_payment_and_refetches_summary() {
    let api = FakeFeeApi::new();
    let out = run(
        &api,
        &["pay", "--student", " 7 ", "--months", "4, 5", "--method", "1"],
    );
    assert_eq!(out.last().unwrap().level, Level::Success);

    let calls = api.calls();
    let Some(Call::MakePayment(7, req)) = calls.iter().find(|c| matches!(c, Call::MakePayment(..)))
    else {
        panic!("no payment recorded");
    };
    assert_eq!(req.amount, dec("1600"));
    assert_eq!(req.selected_months, vec![4, 5]);
    assert!(req.transaction_id.starts_with("TXN"));
    assert!(matches!(calls.last(), Some(Call::ListStudents(_))));
}

#[test]
fn pay_command_amount_override_applies_after_toggles() {
    let api = FakeFeeApi::new();
    run(
        &api,
        &["pay", "--student", "7", "--months", "4,5", "--method", "1", "--amount", "900"],
    );
    let calls = api.mutations();
    let Call::MakePayment(_, req) = &calls[0] else {
        panic!("no payment recorded");
    };
    assert_eq!(req.amount, dec("900"));
}

#[test]
fn pay_command_requires_reference_for_bank_transfer() {
    let api = FakeFeeApi::new();
    let out = run(&api, &["pay", "--student", "7", "--months", "4", "--method", "2"]);
    assert!(api.mutations().is_empty());
    assert_eq!(
        out.last().unwrap(),
        &Notification::new(Level::Warning, "Transaction ID is required for Bank Transfer")
    );
}

#[test]
fn partial_reverse_command_rejects_all_months() {
    let api = FakeFeeApi::new();
    let out = run(
        &api,
        &[
            "reverse", "partial", "--payment", "31", "--student", "7", "--reason", "9",
            "--allocations", "101,102,103",
        ],
    );
    assert!(api.mutations().is_empty());
    assert_eq!(
        out.last().unwrap().message,
        "All months are selected. Use Full Reversal instead"
    );
}

#[test]
fn partial_reverse_command_refreshes_history_and_summary() {
    let api = FakeFeeApi::new();
    run(
        &api,
        &[
            "reverse", "partial", "--payment", "31", "--student", "7", "--reason", "9",
            "--allocations", "101,102",
        ],
    );
    let calls = api.calls();
    let pos = calls
        .iter()
        .position(|c| matches!(c, Call::ReversePartial(31, _)))
        .expect("partial reversal sent");
    let after = &calls[pos + 1..];
    assert!(matches!(after[0], Call::History(7, _)));
    assert!(matches!(after[1], Call::ListStudents(_)));
}

#[test]
fn inactive_reason_is_refused() {
    let api = FakeFeeApi::new();
    let out = run(
        &api,
        &["reverse", "full", "--payment", "31", "--student", "7", "--reason", "10"],
    );
    assert!(api.mutations().is_empty());
    assert_eq!(out.last().unwrap().message, "Reversal reason 10 is not active");
}

#[test]
fn unknown_payment_is_reported() {
    let api = FakeFeeApi::new();
    let out = run(
        &api,
        &["reverse", "full", "--payment", "99", "--student", "7", "--reason", "9"],
    );
    assert!(api.mutations().is_empty());
    assert_eq!(out.last().unwrap().message, "Payment 99 not found for this student");
}

#[test]
fn enable_tracking_command() {
    let api = FakeFeeApi::new();
    let out = run(&api, &["students", "enable-tracking", "--student", "7"]);
    assert_eq!(
        api.mutations(),
        vec![Call::EnableTracking(7, "2025-26".into())]
    );
    assert_eq!(out[0], Notification::new(Level::Success, "Monthly tracking enabled"));
}

#[test]
fn doctor_reports_missing_active_reasons() {
    let mut api = FakeFeeApi::new();
    api.reasons.retain(|r| !r.is_active);
    let rows = commands::doctor::check(&api, &cfg());
    let issues: Vec<&str> = rows.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(issues, vec!["no_token", "no_active_reversal_reasons"]);
}

#[test]
fn history_json_is_printed_for_empty_history() {
    let mut api = FakeFeeApi::new();
    api.history.clear();
    let matches = cli::build_cli().get_matches_from(["feeclip", "history", "--student", "7", "--json"]);
    let Some(("history", sub)) = matches.subcommand() else {
        panic!("history subcommand not parsed");
    };
    let mut out = Vec::new();
    let mut buf = Vec::new();
    commands::history::show(&api, &cfg(), sub, &mut out, &mut buf).unwrap();

    let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    assert_eq!(v["payment_history"], serde_json::json!([]));
    assert_eq!(v["summary"]["payment_count"], 0);
    assert_eq!(out[0].message, "No payment history found for this student");
}
