//! # Client Configuration
//!
//! Configuration loaded from environment variables and validated on startup
//! so a misconfigured client fails before its first request.
//!
//! | Variable                   | Default                       |
//! |----------------------------|-------------------------------|
//! | `MARKETPLACE_API_URL`      | `http://localhost:8080`       |
//! | `MARKETPLACE_TIMEOUT_SECS` | `10` (1 to 120)               |
//! | `MARKETPLACE_SESSION_FILE` | `.marketplace/session.json`   |
//!
//! ```rust,no_run
//! use marketplace_admin::config::ClientConfig;
//!
//! let config = ClientConfig::from_env()?;
//! config.validate()?;
//! # Ok::<(), marketplace_admin::AppError>(())
//! ```

use std::path::PathBuf;
use std::time::Duration;

use lib_utils::envs::{get_env_or, get_env_parse_or};
use reqwest::Url;

use crate::core::error::{AppError, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SESSION_FILE: &str = ".marketplace/session.json";

/// Admin client configuration.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Backend origin, without the `/api/v1` prefix
    pub api_url: String,

    /// Per-request timeout. A request that exceeds it fails as unavailable
    /// instead of leaving a view loading forever.
    pub timeout: Duration,

    /// Where the file session store keeps the token and cached profile
    pub session_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at `api_url` with default timeout and session file.
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let api_url = get_env_or("MARKETPLACE_API_URL", DEFAULT_API_URL);
        let timeout_secs: u64 = get_env_parse_or("MARKETPLACE_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let session_file = PathBuf::from(get_env_or("MARKETPLACE_SESSION_FILE", DEFAULT_SESSION_FILE));

        Ok(Self {
            api_url,
            timeout: Duration::from_secs(timeout_secs),
            session_file,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api_url)
            .map_err(|e| AppError::Config(format!("MARKETPLACE_API_URL is not a valid URL: {}", e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "MARKETPLACE_API_URL must use http or https, got {}",
                url.scheme()
            )));
        }

        let secs = self.timeout.as_secs();
        if !(1..=120).contains(&secs) {
            return Err(AppError::Config(
                "MARKETPLACE_TIMEOUT_SECS must be between 1 and 120".to_string(),
            ));
        }

        Ok(())
    }

    /// Backend origin without a trailing slash, ready for path concatenation.
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}
