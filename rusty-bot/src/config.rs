use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context as _;

use rusty_utils::pagination::PaginationOptions;

/// Startup configuration read from the environment.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub token: String,
    pub pagination: PaginationOptions,
}

impl BotConfig {
    /// Read `DISCORD_TOKEN` and the optional `PAGINATION_*` defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let token = env::var("DISCORD_TOKEN").context("DISCORD_TOKEN must be set")?;

        let mut pagination = PaginationOptions::default();
        if let Some(millis) = optional_var::<u64>("PAGINATION_TIMEOUT_MS")? {
            pagination.timeout = Duration::from_millis(millis);
        }
        if let Some(max_matches) = optional_var("PAGINATION_MAX_MATCHES")? {
            pagination.max_matches = max_matches;
        }
        if let Some(cycling) = optional_var("PAGINATION_CYCLING")? {
            pagination.cycling = cycling;
        }
        if let Some(extended) = optional_var("PAGINATION_EXTENDED_BUTTONS")? {
            pagination.extended_buttons = extended;
        }

        Ok(Self { token, pagination })
    }
}

fn optional_var<T>(name: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => parse_value(name, &raw).map(Some),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(source) => Err(source).with_context(|| format!("failed to read {name}")),
    }
}

fn parse_value<T>(name: &str, raw: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("invalid value for {name}: {raw:?}"))
}
