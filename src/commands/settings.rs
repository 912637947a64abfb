// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{self, Config, KNOWN_KEYS, KEY_TOKEN};
use crate::utils::{get_setting, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => show(conn, cfg)?,
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim();
            let value = sub.get_one::<String>("value").unwrap();
            config::store(conn, key, value)?;
            if key == KEY_TOKEN {
                println!("Stored {}", key);
            } else {
                println!("Stored {} = {}", key, value.trim());
            }
        }
        _ => {}
    }
    Ok(())
}

fn show(conn: &Connection, cfg: &Config) -> Result<()> {
    let mut rows = vec![
        vec!["api_url (effective)".to_string(), cfg.api_url.clone()],
        vec!["session_year (effective)".to_string(), cfg.session_year.clone()],
        vec![
            "token (effective)".to_string(),
            if cfg.token.is_some() { "set" } else { "not set" }.to_string(),
        ],
    ];
    for key in KNOWN_KEYS {
        let stored = get_setting(conn, key)?;
        let shown = match (key, stored) {
            (KEY_TOKEN, Some(_)) => "********".to_string(),
            (_, Some(v)) => v,
            (_, None) => String::new(),
        };
        rows.push(vec![format!("{} (stored)", key), shown]);
    }
    println!("{}", pretty_table(&["Setting", "Value"], rows));
    Ok(())
}
