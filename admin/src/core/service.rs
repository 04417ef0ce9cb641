//! # Service Traits
//!
//! Traits for dependency injection, so views and forms can be driven by the
//! real HTTP client or by in-memory fakes in tests.

use async_trait::async_trait;
use shared::{ProfileUpdate, RegisterRequest, User};

use super::error::{ApiError, AppError};
use crate::services::api::resource::Resource;

/// The five CRUD operations every backend resource exposes.
///
/// Implemented by [`crate::services::api::ResourceClient`].
#[async_trait]
pub trait ResourceApi<R: Resource>: Send + Sync {
    /// Fetch the whole collection. An empty-body success is an empty list.
    async fn list_all(&self) -> Result<Vec<R::Entity>, ApiError>;

    /// Fetch one entity, `ApiError::NotFound` when it does not exist.
    async fn get_by_id(&self, id: i64) -> Result<R::Entity, ApiError>;

    /// Create an entity and return it with its server-assigned id.
    async fn create(&self, payload: &R::Payload) -> Result<R::Entity, ApiError>;

    /// Replace an entity. The id is repeated in the request body.
    async fn update(&self, id: i64, payload: &R::Payload) -> Result<R::Entity, ApiError>;

    /// Delete an entity. Deleting something already gone succeeds.
    async fn delete(&self, id: i64) -> Result<(), ApiError>;
}

/// Authentication endpoints.
///
/// These write the session as well as calling the backend, so they fail
/// with [`AppError`].
///
/// Implemented by [`crate::services::api::ApiClient`].
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange credentials for a token, then cache the caller's profile.
    async fn login(&self, username: String, password: String) -> Result<User, AppError>;

    /// Fetch and cache the authenticated user's profile.
    async fn me(&self) -> Result<User, AppError>;

    /// Self-registration of a new account.
    async fn register(&self, request: RegisterRequest) -> Result<(), AppError>;

    /// Edit the caller's own details and refresh the cached profile.
    async fn update_profile(&self, update: ProfileUpdate) -> Result<User, AppError>;

    /// Drop the stored session.
    fn logout(&self) -> Result<(), AppError>;
}
