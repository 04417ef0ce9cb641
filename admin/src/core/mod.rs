//! # Core Abstractions
//!
//! Error types and service traits shared by every layer of the client.
//!
//! ## Modules
//!
//! - **[`error`]**: The backend failure taxonomy ([`ApiError`]) and the
//!   application error ([`AppError`], `Result<T>`)
//! - **[`service`]**: Service traits for dependency injection
//!   ([`ResourceApi`], [`AuthService`])
//!
//! ## Error Handling
//!
//! The HTTP wrapper classifies every failed call exactly once. Resource
//! modules pass the classification through unchanged and views match on it
//! exhaustively:
//!
//! ```rust,no_run
//! use marketplace_admin::core::error::ApiError;
//!
//! fn banner(error: &ApiError) -> Option<String> {
//!     match error {
//!         ApiError::Unauthenticated => None, // redirect instead
//!         ApiError::NotFound => Some("Nothing here".to_string()),
//!         ApiError::Forbidden(msg) | ApiError::InvalidRequest(msg) => Some(msg.clone()),
//!         ApiError::Unavailable(msg) => Some(format!("{msg} (retry)")),
//!     }
//! }
//! ```
//!
//! ## Dependency Injection
//!
//! Views and forms talk to [`ResourceApi`] rather than the concrete HTTP
//! client, so tests can hand them an in-memory fake:
//!
//! ```rust,ignore
//! let api: Arc<dyn ResourceApi<Products>> = Arc::new(client.products());
//! let api: Arc<dyn ResourceApi<Products>> = Arc::new(FakeProducts::default());
//! ```

pub mod error;
pub mod service;

pub use error::{ApiError, AppError, Result};
pub use service::{AuthService, ResourceApi};
