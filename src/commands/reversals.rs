// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::FeeApi;
use crate::config::Config;
use crate::commands::{history, students::print_students};
use crate::models::{PaymentRecord, ReversalReason};
use crate::notify::Notifier;
use crate::request::{Refresh, SubmitOutcome};
use crate::reversal::{FullReversal, ReversalAction, ReversalSelection, reversal_actions};
use crate::students::StudentTable;
use crate::utils::{parse_id, parse_id_list};
use anyhow::Result;

pub fn handle<N: Notifier>(
    api: &dyn FeeApi,
    cfg: &Config,
    m: &clap::ArgMatches,
    out: &mut N,
) -> Result<()> {
    match m.subcommand() {
        Some(("full", sub)) => full(api, cfg, sub, out)?,
        Some(("partial", sub)) => partial(api, cfg, sub, out)?,
        _ => {}
    }
    Ok(())
}

struct Target {
    student_id: i64,
    payment: PaymentRecord,
    reason_id: i64,
    details: String,
}

/// Resolve the payment row and reason the operator picked. `None` means a
/// notification already explained why nothing happens.
fn target<N: Notifier>(
    api: &dyn FeeApi,
    cfg: &Config,
    sub: &clap::ArgMatches,
    action: ReversalAction,
    out: &mut N,
) -> Result<Option<Target>> {
    let student_id = parse_id(sub.get_one::<String>("student").unwrap())?;
    let payment_id = parse_id(sub.get_one::<String>("payment").unwrap())?;
    let reason_id = parse_id(sub.get_one::<String>("reason").unwrap())?;
    let details = sub
        .get_one::<String>("details")
        .cloned()
        .unwrap_or_default();

    let reasons: Vec<ReversalReason> = match api.get_reversal_reasons() {
        Ok(r) => r,
        Err(e) => {
            out.error(e.display_message("Failed to load reversal reasons"));
            return Ok(None);
        }
    };
    if !reasons.iter().any(|r| r.is_active && r.id == reason_id) {
        out.warning(format!("Reversal reason {} is not active", reason_id));
        return Ok(None);
    }

    let Some(hist) = history::load(api, student_id, &cfg.session_year, out) else {
        return Ok(None);
    };
    let Some(payment) = hist.payment_history.into_iter().find(|p| p.id == payment_id) else {
        out.warning(format!("Payment {} not found for this student", payment_id));
        return Ok(None);
    };
    if !reversal_actions(&payment).contains(&action) {
        out.warning(format!(
            "{} is not available for payment {}",
            action.label(),
            payment_id
        ));
        return Ok(None);
    }
    Ok(Some(Target {
        student_id,
        payment,
        reason_id,
        details,
    }))
}

fn full<N: Notifier>(
    api: &dyn FeeApi,
    cfg: &Config,
    sub: &clap::ArgMatches,
    out: &mut N,
) -> Result<()> {
    let Some(t) = target(api, cfg, sub, ReversalAction::Full, out)? else {
        return Ok(());
    };
    let mut dialog = FullReversal::new(t.student_id, t.payment.id);
    dialog.set_reason(t.reason_id);
    dialog.set_details(&t.details);
    let outcome = dialog.submit(api, out);
    after_submit(api, cfg, outcome, out);
    Ok(())
}

fn partial<N: Notifier>(
    api: &dyn FeeApi,
    cfg: &Config,
    sub: &clap::ArgMatches,
    out: &mut N,
) -> Result<()> {
    let ids: Vec<i64> = parse_id_list(sub.get_one::<String>("allocations").unwrap())?;
    let Some(t) = target(api, cfg, sub, ReversalAction::Partial, out)? else {
        return Ok(());
    };
    let mut selection = ReversalSelection::new(t.student_id);
    selection.load(&t.payment);
    for id in ids {
        if selection.allocations().iter().any(|a| a.id == id) {
            selection.toggle_allocation(id);
        } else {
            out.info(format!(
                "Allocation {} does not belong to payment {}; skipped",
                id, t.payment.id
            ));
        }
    }
    selection.set_reason(t.reason_id);
    selection.set_details(&t.details);
    let outcome = selection.submit(api, out);
    after_submit(api, cfg, outcome, out);
    Ok(())
}

fn after_submit<N: Notifier>(api: &dyn FeeApi, cfg: &Config, outcome: SubmitOutcome, out: &mut N) {
    let SubmitOutcome::Completed { refresh, .. } = outcome else {
        return;
    };
    for r in &refresh {
        match r {
            Refresh::PaymentHistory(student_id) => {
                if let Some(h) = history::load(api, *student_id, &cfg.session_year, out) {
                    history::print_history(&h);
                }
            }
            Refresh::StudentSummary => {
                let mut table = StudentTable::new(&cfg.session_year);
                if table.refresh(api, out) {
                    let ids: Vec<i64> = refresh
                        .iter()
                        .filter_map(|r| match r {
                            Refresh::PaymentHistory(id) => Some(*id),
                            _ => None,
                        })
                        .collect();
                    let rows: Vec<_> = table
                        .rows
                        .into_iter()
                        .filter(|row| ids.contains(&row.student_id))
                        .collect();
                    print_students(&rows);
                }
            }
        }
    }
}
