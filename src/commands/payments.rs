// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::FeeApi;
use crate::config::Config;
use crate::models::AvailableMonth;
use crate::notify::Notifier;
use crate::payment::PaymentDialog;
use crate::request::SubmitOutcome;
use crate::students::StudentTable;
use crate::utils::{fmt_money, maybe_print_json, parse_id, parse_id_list, pretty_table};
use anyhow::Result;
use chrono::Utc;

pub fn months<N: Notifier>(
    api: &dyn FeeApi,
    cfg: &Config,
    sub: &clap::ArgMatches,
    out: &mut N,
) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let student_id = parse_id(sub.get_one::<String>("student").unwrap())?;

    let Some(dialog) = PaymentDialog::open(api, student_id, &cfg.session_year, out) else {
        return Ok(());
    };
    if !maybe_print_json(json_flag, jsonl_flag, &dialog.payload)? {
        let p = &dialog.payload;
        println!(
            "{} ({}) monthly fee {} | {} unpaid, {} overdue, balance {}",
            p.student.name,
            p.student.class_name.as_deref().unwrap_or("-"),
            fmt_money(&p.monthly_fee),
            p.summary.total_months,
            p.summary.overdue_months,
            fmt_money(&p.summary.total_balance),
        );
        print_months(dialog.months());
    }
    Ok(())
}

pub fn print_months(months: &[AvailableMonth]) {
    let rows: Vec<Vec<String>> = months
        .iter()
        .map(|m| {
            vec![
                m.month.to_string(),
                format!("{} {}", m.month_name, m.year),
                fmt_money(&m.monthly_amount),
                fmt_money(&m.balance_amount),
                m.due_date.map(|d| d.to_string()).unwrap_or_default(),
                if m.is_overdue {
                    format!("{} days", m.days_overdue)
                } else {
                    String::new()
                },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["#", "Month", "Due", "Balance", "Due Date", "Overdue"], rows)
    );
}

pub fn pay<N: Notifier>(
    api: &dyn FeeApi,
    cfg: &Config,
    sub: &clap::ArgMatches,
    out: &mut N,
) -> Result<()> {
    let student_id = parse_id(sub.get_one::<String>("student").unwrap())?;
    let months: Vec<u32> = parse_id_list(sub.get_one::<String>("months").unwrap())?;
    let method_id = parse_id(sub.get_one::<String>("method").unwrap())?;

    let methods = match api.get_payment_methods() {
        Ok(m) => m,
        Err(e) => {
            out.error(e.display_message("Failed to load payment methods"));
            return Ok(());
        }
    };
    let Some(mut dialog) = PaymentDialog::open(api, student_id, &cfg.session_year, out) else {
        return Ok(());
    };

    for m in months {
        if dialog.months().iter().any(|a| a.month == m) {
            dialog.selection.toggle_month(m);
        } else {
            out.info(format!("Month {} is not open for payment; skipped", m));
        }
    }
    // toggles overwrite the amount, so an explicit one goes last
    if let Some(a) = sub.get_one::<String>("amount") {
        dialog.selection.set_amount(a.trim());
    }
    dialog.selection.set_payment_method(method_id);
    if let Some(t) = sub.get_one::<String>("txn") {
        dialog.selection.set_transaction_id(t);
    }
    if let Some(r) = sub.get_one::<String>("remarks") {
        dialog.selection.set_remarks(r);
    }

    if let SubmitOutcome::Completed { refresh, .. } =
        dialog.submit(api, &methods, out, Utc::now())
    {
        let mut table = StudentTable::new(&cfg.session_year);
        table.apply_refresh(api, &refresh, out);
        if let Some(row) = table.find(student_id) {
            crate::commands::students::print_students(std::slice::from_ref(row));
        }
    }
    Ok(())
}
