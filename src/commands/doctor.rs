// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::FeeApi;
use crate::config::Config;
use crate::utils::pretty_table;
use anyhow::Result;

/// Collect configuration and service issues as (issue, detail) rows.
pub fn check(api: &dyn FeeApi, cfg: &Config) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    // 1) Configuration
    if cfg.token.is_none() {
        rows.push(vec!["no_token".into(), "requests are sent unauthenticated".into()]);
    }

    // 2) Payment methods
    match api.get_payment_methods() {
        Ok(methods) if methods.is_empty() => {
            rows.push(vec!["no_payment_methods".into(), cfg.api_url.clone()]);
        }
        Ok(_) => {}
        Err(e) => rows.push(vec!["payment_methods_unreachable".into(), e.to_string()]),
    }

    // 3) Reversal reasons: at least one must be active for reversals to work
    match api.get_reversal_reasons() {
        Ok(reasons) if !reasons.iter().any(|r| r.is_active) => {
            rows.push(vec!["no_active_reversal_reasons".into(), cfg.api_url.clone()]);
        }
        Ok(_) => {}
        Err(e) => rows.push(vec!["reversal_reasons_unreachable".into(), e.to_string()]),
    }

    // 4) Student summary for the session
    match api.list_students(&cfg.session_year) {
        Ok(students) if students.is_empty() => {
            rows.push(vec!["no_students".into(), cfg.session_year.clone()]);
        }
        Ok(_) => {}
        Err(e) => rows.push(vec!["students_unreachable".into(), e.to_string()]),
    }
    rows
}

pub fn handle(api: &dyn FeeApi, cfg: &Config) -> Result<()> {
    let rows = check(api, cfg);
    if rows.is_empty() {
        println!("✅ doctor: no issues found ({} / {})", cfg.api_url, cfg.session_year);
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
