//! # Generic Resource Client
//!
//! Every backend entity is served by the same five endpoints under its own
//! base path. A [`Resource`] marker type names the path and the entity and
//! payload types; [`ResourceClient`] does the rest.

use std::marker::PhantomData;

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::client::{ApiClient, Reply};
use crate::core::error::ApiError;
use crate::core::service::ResourceApi;

/// Static description of one backend resource.
pub trait Resource: Send + Sync + 'static {
    /// Shape returned by the backend.
    type Entity: DeserializeOwned + Send + Sync + 'static;
    /// Shape sent on create and update, already in the backend envelope.
    type Payload: Serialize + Send + Sync + 'static;

    /// Short plural name, used in logs and CLI arguments.
    const NAME: &'static str;
    const BASE_PATH: &'static str;
    /// Suffix of the list endpoint, appended to the base path.
    const LIST_PATH: &'static str = "";
    /// Suffix of the create endpoint, appended to the base path.
    const CREATE_PATH: &'static str = "";

    fn id_of(entity: &Self::Entity) -> i64;

    fn list_path() -> String {
        format!("{}{}", Self::BASE_PATH, Self::LIST_PATH)
    }

    fn create_path() -> String {
        format!("{}{}", Self::BASE_PATH, Self::CREATE_PATH)
    }

    fn item_path(id: i64) -> String {
        format!("{}/{}", Self::BASE_PATH, id)
    }
}

/// Update body: the payload with the id repeated at the top level.
#[derive(Serialize)]
struct WithId<'a, P> {
    id: i64,
    #[serde(flatten)]
    payload: &'a P,
}

/// List/get/create/update/delete for one [`Resource`].
pub struct ResourceClient<R> {
    api: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceClient<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _resource: PhantomData,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}

#[async_trait]
impl<R: Resource> ResourceApi<R> for ResourceClient<R> {
    #[tracing::instrument(skip(self), fields(resource = R::NAME))]
    async fn list_all(&self) -> Result<Vec<R::Entity>, ApiError> {
        let reply = self
            .api
            .send::<(), Vec<R::Entity>>(Method::GET, &R::list_path(), None)
            .await?;
        let entities = reply.into_option().unwrap_or_default();
        tracing::info!(count = entities.len(), "Listed");
        Ok(entities)
    }

    #[tracing::instrument(skip(self), fields(resource = R::NAME))]
    async fn get_by_id(&self, id: i64) -> Result<R::Entity, ApiError> {
        self.api
            .send::<(), R::Entity>(Method::GET, &R::item_path(id), None)
            .await?
            .into_option()
            .ok_or(ApiError::NotFound)
    }

    #[tracing::instrument(skip(self, payload), fields(resource = R::NAME))]
    async fn create(&self, payload: &R::Payload) -> Result<R::Entity, ApiError> {
        let created = self
            .api
            .send::<R::Payload, R::Entity>(Method::POST, &R::create_path(), Some(payload))
            .await?
            .into_option()
            .ok_or_else(|| ApiError::Unavailable("backend returned no entity".to_string()))?;
        tracing::info!(id = R::id_of(&created), "Created");
        Ok(created)
    }

    #[tracing::instrument(skip(self, payload), fields(resource = R::NAME))]
    async fn update(&self, id: i64, payload: &R::Payload) -> Result<R::Entity, ApiError> {
        let body = WithId { id, payload };
        let reply = self
            .api
            .send::<WithId<'_, R::Payload>, R::Entity>(Method::PUT, &R::item_path(id), Some(&body))
            .await?;
        tracing::info!("Updated");
        match reply {
            Reply::Content(updated) => Ok(updated),
            // Some endpoints answer 204; read the stored state back.
            Reply::Empty => self.get_by_id(id).await,
        }
    }

    #[tracing::instrument(skip(self), fields(resource = R::NAME))]
    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        match self
            .api
            .send_unit::<()>(Method::DELETE, &R::item_path(id), None)
            .await
        {
            Ok(_) => {
                tracing::info!("Deleted");
                Ok(())
            }
            Err(ApiError::NotFound) => {
                tracing::info!("Already gone");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::services::api::{Advertisements, Products, Rules};
    use crate::services::session::Session;
    use serde_json::json;
    use shared::{IdRef, RulePayload};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api_for(server: &MockServer) -> ApiClient {
        let session = Session::in_memory();
        session.store_token("abc").unwrap();
        ApiClient::new(&ClientConfig::with_api_url(server.uri()), session).unwrap()
    }

    fn rule_payload() -> RulePayload {
        RulePayload {
            title: "No food".to_string(),
            description: "Food items cannot be advertised".to_string(),
            active: true,
        }
    }

    #[test]
    fn test_paths() {
        assert_eq!(Advertisements::list_path(), "/api/v1/advertisements/all");
        assert_eq!(Advertisements::create_path(), "/api/v1/advertisements/create");
        assert_eq!(Advertisements::item_path(7), "/api/v1/advertisements/7");
        assert_eq!(Products::list_path(), "/api/v1/products");
        assert_eq!(Rules::create_path(), "/api/v1/rules");
    }

    #[test]
    fn test_update_body_repeats_id() {
        let payload = rule_payload();
        let body = serde_json::to_value(WithId { id: 4, payload: &payload }).unwrap();
        assert_eq!(
            body,
            json!({"id": 4, "title": "No food", "description": "Food items cannot be advertised", "active": true})
        );
    }

    #[tokio::test]
    async fn test_list_no_content_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/advertisements/all"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;
        let client = api_for(&server).advertisements();

        let ads = client.list_all().await.unwrap();

        assert!(ads.is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/products/99"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/products/98"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        let client = api_for(&server).products();

        assert_eq!(client.get_by_id(99).await, Err(ApiError::NotFound));
        assert_eq!(client.get_by_id(98).await, Err(ApiError::NotFound));
    }

    #[tokio::test]
    async fn test_create_uses_create_path_and_envelope() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/advertisements/create"))
            .and(body_json(json!({
                "description": "Calculus books",
                "whatsappNumber": null,
                "advertiser": {"id": 3},
                "products": [{"id": 11}, {"id": 12}]
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 42,
                "description": "Calculus books",
                "advertiser": {"id": 3},
                "products": [{"id": 11}, {"id": 12}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        let client = api_for(&server).advertisements();
        let payload = shared::AdvertisementPayload {
            description: "Calculus books".to_string(),
            created_at: None,
            whatsapp_number: None,
            advertiser: IdRef::new(3),
            products: vec![IdRef::new(11), IdRef::new(12)],
        };

        // Act
        let created = client.create(&payload).await.unwrap();

        // Assert
        assert_eq!(created.id, 42);
        assert_eq!(created.product_ids(), vec![11, 12]);
    }

    #[tokio::test]
    async fn test_update_reads_back_on_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/rules/4"))
            .and(body_json(json!({
                "id": 4, "title": "No food", "description": "Food items cannot be advertised", "active": true
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/rules/4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 4, "title": "No food", "description": "Food items cannot be advertised", "active": true
            })))
            .expect(1)
            .mount(&server)
            .await;
        let client = api_for(&server).rules();

        let updated = client.update(4, &rule_payload()).await.unwrap();

        assert_eq!(updated.id, 4);
        assert_eq!(updated.title, "No food");
    }

    #[tokio::test]
    async fn test_delete_missing_is_success() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/products/5"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;
        let client = api_for(&server).products();

        assert_eq!(client.delete(5).await, Ok(()));
    }

    #[tokio::test]
    async fn test_delete_with_text_confirmation_is_success() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/products/5"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("Product deleted successfully", "text/plain"),
            )
            .expect(1)
            .mount(&server)
            .await;
        let client = api_for(&server).products();

        // Act
        let result = client.delete(5).await;

        // Assert
        assert_eq!(result, Ok(()));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found_and_list_excludes_it() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/rules/2"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/rules/2"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/rules"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "title": "Be kind", "description": "", "active": true}
            ])))
            .mount(&server)
            .await;
        let client = api_for(&server).rules();

        // Act
        client.delete(2).await.unwrap();
        let fetched = client.get_by_id(2).await;
        let remaining = client.list_all().await.unwrap();

        // Assert
        assert_eq!(fetched, Err(ApiError::NotFound));
        assert!(remaining.iter().all(|rule| rule.id != 2));
    }

    #[tokio::test]
    async fn test_delete_forbidden_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({"message": "admins only"})))
            .mount(&server)
            .await;
        let client = api_for(&server).users();

        assert_eq!(
            client.delete(1).await,
            Err(ApiError::Forbidden("admins only".to_string()))
        );
    }
}
