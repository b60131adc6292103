use std::{env, path::PathBuf, time::Duration};

use crate::{errors::Error, Result};

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

const DEFAULT_RETRY_PERIOD_SECS: u64 = 600;
const DEFAULT_FROM_DATE_OFFSET_SECS: u64 = 500;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Raw credential values as found in the environment.
///
/// Nothing here is validated; `tokens::check_tokens` turns this into usable tokens.
#[derive(Clone, Debug, Default)]
pub struct Credentials {
    pub practicum_token: Option<String>,
    pub telegram_token: Option<String>,
    pub chat_id: Option<String>,
}

/// Typed configuration, read once at startup and passed down explicitly.
#[derive(Clone, Debug)]
pub struct Config {
    pub credentials: Credentials,

    // Homework API
    pub endpoint: String,
    pub request_timeout: Duration,

    // Poll loop
    pub retry_period: Duration,
    pub from_date_offset: Duration,

    // Logging
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Load from `.env` (if present) and the process environment.
    pub fn load() -> Result<Self> {
        // Real environment wins over `.env`; dotenvy never overrides.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let credentials = Credentials {
            practicum_token: lookup("PRACTICUM_TOKEN").and_then(non_empty),
            telegram_token: lookup("TELEGRAM_TOKEN").and_then(non_empty),
            chat_id: lookup("CHAT_ID").and_then(non_empty),
        };

        let endpoint = lookup("PRACTICUM_ENDPOINT")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let retry_period = Duration::from_secs(
            parse_u64(&lookup, "RETRY_PERIOD_SECS")?.unwrap_or(DEFAULT_RETRY_PERIOD_SECS),
        );
        let from_date_offset = Duration::from_secs(
            parse_u64(&lookup, "FROM_DATE_OFFSET_SECS")?.unwrap_or(DEFAULT_FROM_DATE_OFFSET_SECS),
        );
        let request_timeout = Duration::from_secs(
            parse_u64(&lookup, "REQUEST_TIMEOUT_SECS")?.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        );
        if request_timeout.is_zero() {
            return Err(Error::Config(
                "REQUEST_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        let log_file = lookup("LOG_FILE").and_then(non_empty).map(PathBuf::from);

        Ok(Self {
            credentials,
            endpoint,
            request_timeout,
            retry_period,
            from_date_offset,
            log_file,
        })
    }
}

fn parse_u64(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<u64>> {
    let Some(raw) = lookup(key).and_then(non_empty) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|e| Error::Config(format!("{key} must be a non-negative integer: {e}")))
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
