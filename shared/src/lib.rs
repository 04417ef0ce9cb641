//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the admin client and the
//! marketplace backend. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::advertisement`]**: advertisements and their write envelope
//!   - **[`dto::product`]**: products and the fixed category set
//!   - **[`dto::rule`]**: marketplace rules
//!   - **[`dto::user`]**: users, profiles and roles
//!   - **[`dto::auth`]**: login, registration and error bodies
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::format_phone`]**: Brazilian phone display mask
//!   - **[`utils::whatsapp_link`]**: `wa.me` contact links
//!
//! ## Wire Format
//!
//! The backend speaks **camelCase** JSON:
//! - Rust fields are snake_case and renamed with `#[serde(rename_all = "camelCase")]`
//! - Write payloads reference other entities through `{ "id": .. }` objects ([`IdRef`])
//! - Read shapes that historically arrived under several field names are
//!   normalized once, at deserialization (see [`dto::user`] and [`dto::auth`])
//!
//! ## Usage
//!
//! ```rust
//! use shared::{Advertisement, AdvertisementPayload, IdRef};
//!
//! let ad: Advertisement = serde_json::from_str(
//!     r#"{"id": 7, "description": "Calculus books", "advertiser": {"id": 3}, "products": [{"id": 11}]}"#,
//! ).unwrap();
//!
//! let payload = AdvertisementPayload {
//!     description: ad.description.clone(),
//!     created_at: ad.created_at.clone(),
//!     whatsapp_number: None,
//!     advertiser: IdRef::new(3),
//!     products: vec![IdRef::new(11)],
//! };
//! let body = serde_json::to_value(&payload).unwrap();
//! assert_eq!(body["advertiser"]["id"], 3);
//! ```

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
pub use dto::*;
pub use utils::*;
