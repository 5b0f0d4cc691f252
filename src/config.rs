//! Client configuration, read from environment variables at startup.

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Runtime configuration for the chat client.
///
/// Every field has a default so the client starts against a local backend
/// without any environment variables set.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL without the `/api` prefix (default: `"http://localhost:8000"`).
    pub api_url: String,

    /// `tracing` filter string, e.g. `"info"` or `"debug,reqwest=warn"`.
    pub log_level: String,

    /// Per-request timeout. `None` keeps the HTTP client default.
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup("MENTOR_API_URL")
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            api_url,
            log_level: lookup("MENTOR_LOG").unwrap_or_else(|| "info".to_string()),
            request_timeout: lookup("MENTOR_REQUEST_TIMEOUT_SECS")
                .and_then(|value| value.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }
}
