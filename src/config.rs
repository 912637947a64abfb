// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use log::debug;
use rusqlite::Connection;
use serde::Serialize;

use crate::utils::{get_setting, parse_session_year, session_year_for, set_setting};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

pub const KEY_API_URL: &str = "api_url";
pub const KEY_SESSION: &str = "session_year";
pub const KEY_TOKEN: &str = "token";

pub const ENV_API_URL: &str = "FEECLIP_API_URL";
pub const ENV_SESSION: &str = "FEECLIP_SESSION";
pub const ENV_TOKEN: &str = "FEECLIP_TOKEN";

pub const KNOWN_KEYS: [&str; 3] = [KEY_API_URL, KEY_SESSION, KEY_TOKEN];

#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub api_url: String,
    pub session_year: String,
    #[serde(skip_serializing)]
    pub token: Option<String>,
}

impl Config {
    /// Environment first, then stored settings, then defaults.
    pub fn resolve(conn: &Connection, today: NaiveDate) -> Result<Self> {
        Self::resolve_with(conn, today, |k| std::env::var(k).ok())
    }

    pub fn resolve_with<F>(conn: &Connection, today: NaiveDate, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |env_key: &str, key: &str| -> Result<Option<String>> {
            if let Some(v) = env(env_key).filter(|v| !v.trim().is_empty()) {
                debug!("{} taken from {}", key, env_key);
                return Ok(Some(v.trim().to_string()));
            }
            get_setting(conn, key)
        };

        let api_url = pick(ENV_API_URL, KEY_API_URL)?.unwrap_or_else(|| DEFAULT_API_URL.into());
        let session_year = match pick(ENV_SESSION, KEY_SESSION)? {
            Some(s) => parse_session_year(&s)?,
            None => session_year_for(today),
        };
        let token = pick(ENV_TOKEN, KEY_TOKEN)?;
        Ok(Config {
            api_url,
            session_year,
            token,
        })
    }

    pub fn with_session(mut self, session: Option<&str>) -> Result<Self> {
        if let Some(s) = session {
            self.session_year = parse_session_year(s)?;
        }
        Ok(self)
    }
}

/// Store a setting after checking the key and, for session years, the format.
pub fn store(conn: &Connection, key: &str, value: &str) -> Result<()> {
    let key = key.trim();
    let value = value.trim();
    if !KNOWN_KEYS.contains(&key) {
        return Err(anyhow!(
            "Unknown setting '{}', expected one of {}",
            key,
            KNOWN_KEYS.join(", ")
        ));
    }
    let value = match key {
        KEY_SESSION => parse_session_year(value)?,
        KEY_API_URL => {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(anyhow!("Invalid API URL '{}'", value));
            }
            value.trim_end_matches('/').to_string()
        }
        _ => value.to_string(),
    };
    set_setting(conn, key, &value)
}
