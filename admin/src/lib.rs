//! # Marketplace Admin - Library Root
//!
//! Administration client for the campus marketplace REST backend.
//! This library crate contains all modules used by the binary crate (`main.rs`).
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │  cli / any front-end                                   │
//! ├────────────────────────────────────────────────────────┤
//! │  app       - routes, forms, list/detail views, filters │
//! ├────────────────────────────────────────────────────────┤
//! │  services  - ResourceClient<R>, auth endpoints         │
//! │            - ApiClient (bearer, status classification) │
//! │            - Session over a SessionStore               │
//! └────────────────────────────────────────────────────────┘
//!          │ HTTP + JSON
//!          ▼
//! ┌─────────────────────────┐
//! │  Marketplace backend    │
//! │  /api/v1/..., /auth/... │
//! └─────────────────────────┘
//! ```
//!
//! Control flow is always view → resource module → HTTP wrapper, with the
//! result stored back in the view's state.
//!
//! ## Module Structure
//!
//! - **app**: Front-end state machines
//! - **services**: Backend client and session
//! - **core**: Error taxonomy and service traits
//! - **config**: Environment configuration
//! - **debug**: Logging setup
//! - **cli**: The `marketplace-admin` command line
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use marketplace_admin::app::ListView;
//! use marketplace_admin::config::ClientConfig;
//! use marketplace_admin::services::api::Rules;
//! use marketplace_admin::services::{ApiClient, Session};
//!
//! # async fn run() -> marketplace_admin::Result<()> {
//! let config = ClientConfig::from_env()?;
//! let client = ApiClient::new(&config, Session::open_file(&config.session_file)?)?;
//!
//! let mut rules = ListView::<Rules>::new(Arc::new(client.rules()));
//! rules.load().await;
//! for rule in rules.items() {
//!     println!("{} {}", rule.id, rule.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod debug;
pub mod services;

pub use crate::core::error::{ApiError, AppError, Result};
