//! Configuration for the tracker connection.
//!
//! Values come from CLI flags with environment fallback (`REDMINE_URL`,
//! `REDMINE_API_KEY`, wired through clap's `env` feature). Both are required
//! before any request goes out; auth is a static API key sent as a custom
//! header on every call.

use crate::error::{Result, TracklineError};

/// Connection settings for the tracker API.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the tracker, without a trailing slash.
    pub base_url: String,
    /// Static API key sent as `X-Redmine-API-Key`.
    pub api_key: String,
}

impl Config {
    /// Build and validate a config from optional flag/env values.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when either value is missing or the URL
    /// is not http(s).
    pub fn new(base_url: Option<String>, api_key: Option<String>) -> Result<Self> {
        let base_url = base_url
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| TracklineError::Config("tracker URL is required (--url or REDMINE_URL)".to_string()))?;
        let api_key = api_key
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                TracklineError::Config("API key is required (--api-key or REDMINE_API_KEY)".to_string())
            })?;

        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(TracklineError::Config(format!(
                "tracker URL must be http(s): {base_url}"
            )));
        }

        Ok(Self { base_url, api_key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = Config::new(
            Some("https://pms.example.com/".to_string()),
            Some("k".to_string()),
        )
        .unwrap();
        assert_eq!(config.base_url, "https://pms.example.com");
    }

    #[test]
    fn test_missing_url_rejected() {
        assert!(Config::new(None, Some("k".to_string())).is_err());
        assert!(Config::new(Some("  ".to_string()), Some("k".to_string())).is_err());
    }

    #[test]
    fn test_missing_key_rejected() {
        assert!(Config::new(Some("https://x".to_string()), None).is_err());
    }

    #[test]
    fn test_non_http_url_rejected() {
        let err = Config::new(Some("ftp://x".to_string()), Some("k".to_string()));
        assert!(err.is_err());
    }
}
