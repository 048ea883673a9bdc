// src/config.rs
// =============================================================================
// Runtime settings for talking to the repository API.
//
// Values come from the global CLI flags, which clap lets fall back to
// environment variables (see cli.rs). This module validates them and hands
// the result to the HTTP client.
// =============================================================================

use anyhow::{anyhow, Result};
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings used to build the GitHub client.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the REST API, e.g. `https://api.github.com`.
    pub api_base: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// GitHub rejects API requests without a User-Agent.
    pub user_agent: String,
}

impl Settings {
    /// Validates raw flag values.
    pub fn new(api_base: &str, timeout_secs: u64, user_agent: Option<String>) -> Result<Self> {
        let api_base = Url::parse(api_base)
            .map_err(|e| anyhow!("Invalid API base URL '{}': {}", api_base, e))?;

        if api_base.cannot_be_a_base() {
            return Err(anyhow!("API base URL cannot have paths: {}", api_base));
        }

        if timeout_secs == 0 {
            return Err(anyhow!("Timeout must be at least one second"));
        }

        Ok(Settings {
            api_base,
            timeout: Duration::from_secs(timeout_secs),
            user_agent: user_agent.unwrap_or_else(default_user_agent),
        })
    }
}

fn default_user_agent() -> String {
    format!("repo-browser/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::new(DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS, None).unwrap();
        assert_eq!(settings.api_base.as_str(), "https://api.github.com/");
        assert_eq!(settings.timeout, Duration::from_secs(10));
        assert!(settings.user_agent.starts_with("repo-browser/"));
    }

    #[test]
    fn test_settings_custom_values() {
        let settings =
            Settings::new("http://localhost:9000/api", 3, Some("tester".to_string())).unwrap();
        assert_eq!(settings.api_base.as_str(), "http://localhost:9000/api");
        assert_eq!(settings.timeout, Duration::from_secs(3));
        assert_eq!(settings.user_agent, "tester");
    }

    #[test]
    fn test_settings_reject_bad_values() {
        assert!(Settings::new("not a url", 10, None).is_err());
        assert!(Settings::new("mailto:someone@example.com", 10, None).is_err());
        assert!(Settings::new(DEFAULT_API_BASE, 0, None).is_err());
    }
}
