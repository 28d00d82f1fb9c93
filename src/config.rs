use serde::Deserialize;
use std::time::Duration;

use crate::checkin::retry::RetryPolicy;
use crate::error::{CheckinError, Result};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Comma-separated bearer tokens, one per account.
    #[serde(default)]
    pub tokens: String,
    pub max_retries: u32,
    /// Base backoff delay between retry attempts, in milliseconds.
    pub retry_base_delay: u64,
    /// Per-request timeout, in milliseconds.
    pub request_timeout: u64,
    #[serde(default)]
    pub proxy_url: Option<String>,
    pub pacing_min_ms: u64,
    pub pacing_max_ms: u64,
    pub log_dir: String,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let config = Self::defaults()?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::Environment::default())
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Load from an explicit file only, skipping the process environment.
    #[allow(dead_code)]
    pub fn from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let config = Self::defaults()?
            .add_source(config::File::from(path))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    fn defaults() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(config::Config::builder()
            .set_default("max_retries", 3u64)?
            .set_default("retry_base_delay", 5000u64)?
            .set_default("request_timeout", 10_000u64)?
            .set_default("pacing_min_ms", 2000u64)?
            .set_default("pacing_max_ms", 3000u64)?
            .set_default("log_dir", "logs")?)
    }

    /// Tokens split on commas, trimmed, empty entries discarded.
    pub fn tokens(&self) -> Vec<String> {
        self.tokens
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()
    }

    /// Like `tokens()`, but an empty list is a fatal configuration error.
    pub fn require_tokens(&self) -> Result<Vec<String>> {
        let tokens = self.tokens();
        if tokens.is_empty() {
            return Err(CheckinError::NoTokens);
        }
        Ok(tokens)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, Duration::from_millis(self.retry_base_delay))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout)
    }

    pub fn pacing_window(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.pacing_min_ms),
            Duration::from_millis(self.pacing_max_ms),
        )
    }
}
