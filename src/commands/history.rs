// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::FeeApi;
use crate::config::Config;
use crate::models::PaymentHistory;
use crate::notify::Notifier;
use crate::reversal::reversal_actions;
use crate::utils::{fmt_money, parse_id, pretty_table, write_json};
use anyhow::Result;
use std::io::Write;

/// Fetch the history, reporting failures and empty results through `out`.
pub fn load<N: Notifier>(
    api: &dyn FeeApi,
    student_id: i64,
    session_year: &str,
    out: &mut N,
) -> Option<PaymentHistory> {
    match api.get_payment_history(student_id, session_year) {
        Ok(h) => {
            if h.payment_history.is_empty() {
                out.info("No payment history found for this student");
            }
            Some(h)
        }
        Err(e) => {
            out.error(e.display_message("Failed to load payment history"));
            None
        }
    }
}

pub fn handle<N: Notifier>(
    api: &dyn FeeApi,
    cfg: &Config,
    sub: &clap::ArgMatches,
    out: &mut N,
) -> Result<()> {
    show(api, cfg, sub, out, &mut std::io::stdout().lock())
}

/// Like `handle`, but JSON goes to `w`. An empty history still yields JSON.
pub fn show<N: Notifier, W: Write>(
    api: &dyn FeeApi,
    cfg: &Config,
    sub: &clap::ArgMatches,
    out: &mut N,
    w: &mut W,
) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let student_id = parse_id(sub.get_one::<String>("student").unwrap())?;

    let Some(history) = load(api, student_id, &cfg.session_year, out) else {
        return Ok(());
    };
    if write_json(w, json_flag, jsonl_flag, &history)? {
        return Ok(());
    }
    if !history.payment_history.is_empty() {
        print_history(&history);
    }
    Ok(())
}

pub fn print_history(history: &PaymentHistory) {
    let mut rows = Vec::new();
    for p in &history.payment_history {
        let months: Vec<String> = p
            .allocations
            .iter()
            .map(|a| format!("{}:{} {}", a.id, a.month_name, fmt_money(&a.allocated_amount)))
            .collect();
        let actions: Vec<&str> = reversal_actions(p).iter().map(|a| a.label()).collect();
        rows.push(vec![
            p.id.to_string(),
            p.payment_date.to_string(),
            fmt_money(&p.amount),
            p.payment_method.clone().unwrap_or_default(),
            p.transaction_id.clone().unwrap_or_default(),
            months.join("\n"),
            if p.is_reversed {
                "reversed".to_string()
            } else {
                actions.join(" / ")
            },
        ]);
    }
    println!(
        "{}",
        pretty_table(
            &["ID", "Date", "Amount", "Method", "Txn", "Allocations", "Actions"],
            rows,
        )
    );
    let s = &history.summary;
    println!(
        "{} payments, paid {}, reversed {}",
        s.payment_count,
        fmt_money(&s.total_paid),
        fmt_money(&s.total_reversed)
    );
}
