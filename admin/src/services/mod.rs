//! # Services Module
//!
//! Backend communication and the persisted session.
//!
//! - [`api`]: HTTP wrapper, generic resource client and auth endpoints
//! - [`session`]: bearer token and cached profile over a key-value store

pub mod api;
pub mod session;

pub use api::{ApiClient, ResourceClient};
pub use session::{CurrentUser, FileStore, MemoryStore, Session, SessionStore};
