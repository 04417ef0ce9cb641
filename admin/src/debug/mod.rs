//! # Logging Infrastructure
//!
//! File-based structured logging for the admin client.
//!
//! - **File log**: `logs/marketplace-admin.log`, rotated daily, non-blocking writes
//! - **Console log**: optional stderr layer for interactive CLI runs
//! - **Filter**: `RUST_LOG`, falling back to `marketplace_admin=info,warn`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use marketplace_admin::debug::{self, LogConfig};
//!
//! // Keep the guard alive until exit so buffered lines are flushed
//! let _guard = debug::init(&LogConfig::from_env());
//! tracing::info!("ready");
//! ```

pub mod config;
pub mod logger;

pub use config::LogConfig;
pub use logger::init;
