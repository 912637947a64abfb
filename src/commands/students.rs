// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::FeeApi;
use crate::config::Config;
use crate::models::StudentFeeSummary;
use crate::notify::Notifier;
use crate::students::StudentTable;
use crate::utils::{fmt_money, maybe_print_json, parse_id, pretty_table};
use anyhow::Result;

pub fn handle<N: Notifier>(
    api: &dyn FeeApi,
    cfg: &Config,
    m: &clap::ArgMatches,
    out: &mut N,
) -> Result<()> {
    match m.subcommand() {
        Some(("enable-tracking", sub)) => enable_tracking(api, cfg, sub, out),
        _ => list(api, cfg, m, out),
    }
}

fn list<N: Notifier>(
    api: &dyn FeeApi,
    cfg: &Config,
    sub: &clap::ArgMatches,
    out: &mut N,
) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let class = sub
        .get_one::<String>("class")
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    let mut table = StudentTable::new(&cfg.session_year);
    if !table.refresh(api, out) {
        return Ok(());
    }
    let rows: Vec<StudentFeeSummary> = table
        .rows
        .into_iter()
        .filter(|r| match &class {
            Some(c) => r
                .class_name
                .as_deref()
                .is_some_and(|n| n.trim().to_lowercase() == *c),
            None => true,
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        print_students(&rows);
    }
    Ok(())
}

fn enable_tracking<N: Notifier>(
    api: &dyn FeeApi,
    cfg: &Config,
    sub: &clap::ArgMatches,
    out: &mut N,
) -> Result<()> {
    let student_id = parse_id(sub.get_one::<String>("student").unwrap())?;
    let mut table = StudentTable::new(&cfg.session_year);
    if !table.refresh(api, out) {
        return Ok(());
    }
    if table.enable_tracking(api, student_id, out).is_completed() {
        if let Some(row) = table.find(student_id) {
            print_students(std::slice::from_ref(row));
        }
    }
    Ok(())
}

pub fn print_students(rows: &[StudentFeeSummary]) {
    let data: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.student_id.to_string(),
                r.name.clone(),
                r.class_name.clone().unwrap_or_default(),
                fmt_money(&r.total_fee),
                fmt_money(&r.paid_amount),
                fmt_money(&r.balance),
                format!("{}%", r.collection_percentage.round_dp(1)),
                if r.monthly_tracking_enabled { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Student", "Class", "Total", "Paid", "Balance", "Collected", "Monthly"],
            data,
        )
    );
}
