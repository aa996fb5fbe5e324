use anyhow::{anyhow, Context, Result};
use homework_rust_core::clients::{practicum, telegram};
use log::error;
use std::env;
use std::time::Duration;

/// Required credential: (reported name, env var, legacy alias)
const REQUIRED: [(&str, &str, &str); 3] = [
    ("PRACTICUM_TOKEN", "PRACTICUM_TOKEN", "YA_TOKEN"),
    ("TELEGRAM_TOKEN", "TELEGRAM_TOKEN", "TG_TOKEN"),
    ("TELEGRAM_CHAT_ID", "TELEGRAM_CHAT_ID", "TG_CHAT_ID"),
];

pub const DEFAULT_RETRY_PERIOD_SECS: u64 = 600;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// The three secrets the bot cannot start without.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub practicum_token: Option<String>,
    pub telegram_token: Option<String>,
    pub telegram_chat_id: Option<String>,
}

impl Credentials {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |primary: &str, alias: &str| {
            non_empty(lookup(primary)).or_else(|| non_empty(lookup(alias)))
        };

        Self {
            practicum_token: read(REQUIRED[0].1, REQUIRED[0].2),
            telegram_token: read(REQUIRED[1].1, REQUIRED[1].2),
            telegram_chat_id: read(REQUIRED[2].1, REQUIRED[2].2),
        }
    }

    fn values(&self) -> [(&'static str, Option<&str>); 3] {
        [
            (REQUIRED[0].0, self.practicum_token.as_deref()),
            (REQUIRED[1].0, self.telegram_token.as_deref()),
            (REQUIRED[2].0, self.telegram_chat_id.as_deref()),
        ]
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Names of required credentials that are absent or blank
pub fn missing_credentials(credentials: &Credentials) -> Vec<&'static str> {
    credentials
        .values()
        .into_iter()
        .filter(|(_, value)| value.map_or(true, |v| v.trim().is_empty()))
        .map(|(name, _)| name)
        .collect()
}

/// Token guard: true iff every credential is present.
///
/// Logs one critical line per missing credential.
pub fn check_tokens(credentials: &Credentials) -> bool {
    let missing = missing_credentials(credentials);
    for name in &missing {
        error!("CRITICAL: missing required environment variable: \"{}\"", name);
    }
    missing.is_empty()
}

#[derive(Debug, Clone)]
pub struct Config {
    pub practicum_token: String,
    pub practicum_endpoint: String,

    pub telegram_token: String,
    pub telegram_chat_id: String,
    pub telegram_api_base_url: String,

    pub retry_period: Duration,
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Credentials::from_lookup(&lookup);
        let missing = missing_credentials(&credentials);
        if !missing.is_empty() {
            return Err(anyhow!(
                "Missing required environment variables: {}",
                missing.join(", ")
            ));
        }
        let Credentials {
            practicum_token: Some(practicum_token),
            telegram_token: Some(telegram_token),
            telegram_chat_id: Some(telegram_chat_id),
        } = credentials
        else {
            return Err(anyhow!("credentials incomplete"));
        };

        let practicum_endpoint = non_empty(lookup("PRACTICUM_ENDPOINT"))
            .unwrap_or_else(|| practicum::DEFAULT_ENDPOINT.to_string());
        let telegram_api_base_url = non_empty(lookup("TELEGRAM_API_BASE_URL"))
            .unwrap_or_else(|| telegram::DEFAULT_API_BASE_URL.to_string());

        let retry_period_secs =
            parse_u64(&lookup, "RETRY_PERIOD_SECS", DEFAULT_RETRY_PERIOD_SECS)
                .context("RETRY_PERIOD_SECS")?;
        if retry_period_secs == 0 {
            return Err(anyhow!("Invalid RETRY_PERIOD_SECS: 0 (must be positive)"))
                .context("RETRY_PERIOD_SECS");
        }
        let http_timeout_secs =
            parse_u64(&lookup, "HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)
                .context("HTTP_TIMEOUT_SECS")?;

        Ok(Self {
            practicum_token,
            practicum_endpoint,
            telegram_token,
            telegram_chat_id,
            telegram_api_base_url,
            retry_period: Duration::from_secs(retry_period_secs),
            http_timeout: Duration::from_secs(http_timeout_secs),
        })
    }
}

fn parse_u64<F>(lookup: &F, key: &str, default: u64) -> Result<u64>
where
    F: Fn(&str) -> Option<String>,
{
    match non_empty(lookup(key)) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("Invalid {key}: {raw} (expected integer)")),
    }
}
