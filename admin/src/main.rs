//! # Marketplace Admin
//!
//! Command-line entry point.
//!
//! ## Environment
//!
//! - `MARKETPLACE_API_URL`: backend base URL (default `http://localhost:8080`)
//! - `MARKETPLACE_TIMEOUT_SECS`: per-request timeout (default 10)
//! - `MARKETPLACE_SESSION_FILE`: where the login is kept between runs
//! - `MARKETPLACE_LOG_DIR`, `RUST_LOG`, `MARKETPLACE_LOG_FORMAT`: logging

use std::process::ExitCode;

use clap::Parser;
use marketplace_admin::cli::{self, Cli};
use marketplace_admin::config::ClientConfig;
use marketplace_admin::debug::{self, LogConfig};
use marketplace_admin::services::{ApiClient, Session};
use marketplace_admin::Result;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();

    let mut log_config = LogConfig::from_env();
    log_config.console |= args.verbose;
    let _log_guard = debug::init(&log_config);

    match execute(args).await {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {}", cli::describe(&e));
            ExitCode::FAILURE
        }
    }
}

async fn execute(args: Cli) -> Result<Vec<String>> {
    let config = ClientConfig::from_env()?;
    config.validate()?;
    tracing::info!(api_url = %config.api_url, session_file = %config.session_file.display(), "Starting");

    let session = Session::open_file(&config.session_file)?;
    let client = ApiClient::new(&config, session)?;
    cli::run(args.command, &client).await
}
