// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::FeeApi;
use crate::notify::Notifier;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle<N: Notifier>(api: &dyn FeeApi, m: &clap::ArgMatches, out: &mut N) -> Result<()> {
    match m.subcommand() {
        Some(("methods", sub)) => methods(api, sub, out)?,
        Some(("reasons", sub)) => reasons(api, sub, out)?,
        _ => {}
    }
    Ok(())
}

fn methods<N: Notifier>(api: &dyn FeeApi, sub: &clap::ArgMatches, out: &mut N) -> Result<()> {
    let methods = match api.get_payment_methods() {
        Ok(m) => m,
        Err(e) => {
            out.error(e.display_message("Failed to load payment methods"));
            return Ok(());
        }
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &methods)? {
        let rows = methods
            .iter()
            .map(|m| {
                vec![
                    m.id.to_string(),
                    m.description.clone(),
                    if m.requires_reference { "required" } else { "optional" }.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["ID", "Method", "Reference"], rows));
    }
    Ok(())
}

fn reasons<N: Notifier>(api: &dyn FeeApi, sub: &clap::ArgMatches, out: &mut N) -> Result<()> {
    let reasons: Vec<_> = match api.get_reversal_reasons() {
        Ok(r) => r.into_iter().filter(|r| r.is_active).collect(),
        Err(e) => {
            out.error(e.display_message("Failed to load reversal reasons"));
            return Ok(());
        }
    };
    if reasons.is_empty() {
        out.info("No active reversal reasons configured");
        return Ok(());
    }
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &reasons)? {
        let rows = reasons
            .iter()
            .map(|r| vec![r.id.to_string(), r.description.clone()])
            .collect();
        println!("{}", pretty_table(&["ID", "Reason"], rows));
    }
    Ok(())
}
