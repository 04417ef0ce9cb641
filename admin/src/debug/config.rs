//! Logging configuration from environment variables

use std::path::PathBuf;

use lib_utils::envs::get_env_or;

pub const DEFAULT_LOG_FILTER: &str = "marketplace_admin=info,warn";
pub const LOG_FILE_NAME: &str = "marketplace-admin.log";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Directory holding the rotated log files
    pub log_dir: PathBuf,
    /// Filter directive used when `RUST_LOG` is unset
    pub log_level: String,
    /// Mirror log lines to stderr
    pub console: bool,
    /// Emit JSON lines instead of the plain text format
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_level: DEFAULT_LOG_FILTER.to_string(),
            console: false,
            json: false,
        }
    }
}

impl LogConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            log_dir: PathBuf::from(get_env_or("MARKETPLACE_LOG_DIR", "logs")),
            log_level: get_env_or("RUST_LOG", DEFAULT_LOG_FILTER),
            console: get_env_or("MARKETPLACE_LOG_CONSOLE", "0") == "1",
            json: get_env_or("MARKETPLACE_LOG_FORMAT", "text").eq_ignore_ascii_case("json"),
        }
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(LOG_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_and_file() {
        let config = LogConfig::default();
        assert_eq!(config.log_level, "marketplace_admin=info,warn");
        assert_eq!(config.log_file(), PathBuf::from("logs/marketplace-admin.log"));
    }
}
