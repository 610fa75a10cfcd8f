//! Client configuration, read from the environment.

use std::time::Duration;

use atlan_core::error::{AtlanError, Result};
use url::Url;

pub const ENV_BASE_URL: &str = "ATLAN_BASE_URL";
pub const ENV_API_KEY: &str = "ATLAN_API_KEY";
pub const ENV_TIMEOUT_SECS: &str = "ATLAN_TIMEOUT_SECS";
pub const ENV_MAX_RETRIES: &str = "ATLAN_MAX_RETRIES";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_RETRIES: u32 = 3;

#[derive(Clone)]
pub struct AtlanConfig {
    /// Tenant URL without a trailing slash, e.g. `https://acme.atlan.com`.
    pub base_url: String,
    pub api_token: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub user_agent: String,
}

impl std::fmt::Debug for AtlanConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtlanConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl AtlanConfig {
    pub fn new(base_url: &str, api_token: impl Into<String>) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| AtlanError::Config(format!("invalid base URL '{}': {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AtlanError::Config(format!(
                "base URL must be http or https, got '{}'",
                base_url
            )));
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            user_agent: format!("atlan-rust-sdk/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    /// Reads `ATLAN_BASE_URL` and `ATLAN_API_KEY` (required) plus
    /// `ATLAN_TIMEOUT_SECS` and `ATLAN_MAX_RETRIES` (optional).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup(ENV_BASE_URL)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AtlanError::Config(format!("{} is not set", ENV_BASE_URL)))?;
        let api_token = lookup(ENV_API_KEY)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AtlanError::Config(format!("{} is not set", ENV_API_KEY)))?;
        let mut config = Self::new(&base_url, api_token)?;
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = parse_number(ENV_TIMEOUT_SECS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MAX_RETRIES) {
            config.max_retries = parse_number(ENV_MAX_RETRIES, &raw)?;
        }
        Ok(config)
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| AtlanError::Config(format!("{} must be a number, got '{}'", key, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn reads_required_and_optional_values() {
        let config = AtlanConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "https://acme.atlan.com/"),
            (ENV_API_KEY, "secret"),
            (ENV_MAX_RETRIES, "5"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://acme.atlan.com");
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn missing_token_is_a_config_error() {
        let err = AtlanConfig::from_lookup(lookup(&[(ENV_BASE_URL, "https://acme.atlan.com")]))
            .unwrap_err();
        assert!(matches!(err, AtlanError::Config(_)));
        assert!(err.to_string().contains(ENV_API_KEY));
    }

    #[test]
    fn bad_numbers_are_rejected() {
        let err = AtlanConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "https://acme.atlan.com"),
            (ENV_API_KEY, "secret"),
            (ENV_TIMEOUT_SECS, "soon"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains(ENV_TIMEOUT_SECS));
    }

    #[test]
    fn rejects_non_http_urls() {
        assert!(AtlanConfig::new("ftp://acme", "t").is_err());
        assert!(AtlanConfig::new("not a url", "t").is_err());
    }

    #[test]
    fn debug_redacts_token() {
        let config = AtlanConfig::new("https://acme.atlan.com", "very-secret").unwrap();
        let debug = format!("{:?}", config);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("very-secret"));
    }
}
