//! # Backend API Client Module
//!
//! HTTP client for the marketplace REST backend.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs            - Module exports and documentation
//! ├── client.rs         - ApiClient: auth header, status classification
//! ├── resource.rs       - Resource trait and the generic ResourceClient
//! ├── advertisements.rs - /api/v1/advertisements
//! ├── products.rs       - /api/v1/products
//! ├── rules.rs          - /api/v1/rules
//! ├── users.rs          - /api/v1/users and avatar uploads
//! └── auth.rs           - /auth (login, me, register, profile, logout)
//! ```

pub mod advertisements;
pub mod auth;
pub mod client;
pub mod products;
pub mod resource;
pub mod rules;
pub mod users;

pub use advertisements::Advertisements;
pub use client::{ApiClient, Reply};
pub use products::Products;
pub use resource::{Resource, ResourceClient};
pub use rules::Rules;
pub use users::{AvatarImage, Users};
