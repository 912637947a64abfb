// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Local;

use feeclip::api::HttpFeeApi;
use feeclip::config::Config;
use feeclip::notify::ConsoleNotifier;
use feeclip::{cli, commands, db};

fn main() -> Result<()> {
    env_logger::init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;
    let cfg = Config::resolve(&conn, Local::now().date_naive())?
        .with_session(cli::session_override(&matches).as_deref())?;
    log::debug!("using {} for session {}", cfg.api_url, cfg.session_year);
    let api = HttpFeeApi::new(&cfg.api_url, cfg.token.clone())?;
    let mut out = ConsoleNotifier::default();

    match matches.subcommand() {
        Some(("students", sub)) => commands::students::handle(&api, &cfg, sub, &mut out)?,
        Some(("months", sub)) => commands::payments::months(&api, &cfg, sub, &mut out)?,
        Some(("pay", sub)) => commands::payments::pay(&api, &cfg, sub, &mut out)?,
        Some(("history", sub)) => commands::history::handle(&api, &cfg, sub, &mut out)?,
        Some(("reverse", sub)) => commands::reversals::handle(&api, &cfg, sub, &mut out)?,
        Some(("config", sub)) => commands::lookups::handle(&api, sub, &mut out)?,
        Some(("settings", sub)) => commands::settings::handle(&conn, &cfg, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&api, &cfg)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    if out.failed {
        std::process::exit(1);
    }
    Ok(())
}
