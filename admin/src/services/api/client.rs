//! # API Client
//!
//! Main HTTP client for backend API communication.

use std::time::Instant;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::ErrorResponse;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::core::error::{ApiError, AppError};
use crate::services::session::Session;

/// Longest backend error text passed on to the user.
const MAX_ERROR_TEXT: usize = 200;

/// Successful response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    Content(T),
    /// 204, or a 2xx with nothing in the body
    Empty,
}

impl<T> Reply<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Reply::Content(value) => Some(value),
            Reply::Empty => None,
        }
    }
}

/// HTTP client for communicating with the backend API server.
///
/// Clones share the connection pool and the session.
#[derive(Clone, Debug)]
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    /// Create a client for `config.api_url` with the configured request timeout.
    pub fn new(config: &ClientConfig, session: Session) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Builder with the JSON accept header and, when the session holds a
    /// usable token, the bearer header.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self
            .client
            .request(method, self.url(path))
            .header(ACCEPT, "application/json");
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn json_request<B>(&self, method: Method, path: &str, body: Option<&B>) -> RequestBuilder
    where
        B: Serialize + ?Sized,
    {
        let request = self
            .request(method, path)
            .header(CONTENT_TYPE, "application/json");
        match body {
            Some(body) => request.json(body),
            None => request,
        }
    }

    /// Send one JSON request and decode the response body.
    ///
    /// A 401 clears the session before the error is returned.
    #[tracing::instrument(
        name = "api_request",
        skip(self, body),
        fields(request_id = %Uuid::new_v4(), method = %method, path = %path)
    )]
    pub async fn send<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Reply<T>, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let start = Instant::now();
        let (status, bytes) = self
            .dispatch(self.json_request(method, path, body), start)
            .await?;
        decode(status, &bytes)
    }

    /// Send one JSON request where only the status matters.
    ///
    /// Any 2xx is success, whatever the body holds (JSON, a plain-text
    /// confirmation, or nothing).
    #[tracing::instrument(
        name = "api_request",
        skip(self, body),
        fields(request_id = %Uuid::new_v4(), method = %method, path = %path)
    )]
    pub async fn send_unit<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let start = Instant::now();
        self.dispatch(self.json_request(method, path, body), start)
            .await?;
        Ok(())
    }

    /// Send a `multipart/form-data` request and decode the response body.
    #[tracing::instrument(
        name = "api_request",
        skip(self, form),
        fields(request_id = %Uuid::new_v4(), method = %method, path = %path)
    )]
    pub async fn send_multipart<T>(&self, method: Method, path: &str, form: Form) -> Result<Reply<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let start = Instant::now();
        let (status, bytes) = self
            .dispatch(self.request(method, path).multipart(form), start)
            .await?;
        decode(status, &bytes)
    }

    /// Execute a prepared request and classify non-success statuses.
    async fn dispatch(&self, request: RequestBuilder, start: Instant) -> Result<(StatusCode, Vec<u8>), ApiError> {
        let response = request.send().await.map_err(|e| {
            let err = ApiError::from_transport(&e);
            tracing::error!(error = %e, duration_ms = start.elapsed().as_millis() as u64, "Network error");
            err
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!(error = %e, status = status.as_u16(), "Failed to read response body");
            ApiError::from_transport(&e)
        })?;
        let duration_ms = start.elapsed().as_millis() as u64;

        if status.is_success() {
            tracing::debug!(status = status.as_u16(), duration_ms, "Request succeeded");
            return Ok((status, bytes.to_vec()));
        }

        let err = ApiError::from_status(status, error_message(&bytes));
        if err == ApiError::Unauthenticated {
            if let Err(e) = self.session.clear() {
                tracing::warn!(error = %e, "Failed to clear session after 401");
            }
        }

        tracing::warn!(
            status = status.as_u16(),
            kind = err.kind(),
            error = %err,
            duration_ms,
            "Request failed"
        );
        Err(err)
    }
}

/// Decode a 2xx body. 204 and blank bodies are [`Reply::Empty`].
fn decode<T: DeserializeOwned>(status: StatusCode, bytes: &[u8]) -> Result<Reply<T>, ApiError> {
    if status == StatusCode::NO_CONTENT || bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Reply::Empty);
    }
    serde_json::from_slice::<T>(bytes).map(Reply::Content).map_err(|e| {
        tracing::error!(status = status.as_u16(), error = %e, "Response body did not match the expected shape");
        ApiError::Unavailable("malformed response".to_string())
    })
}

/// Pull a human-readable message out of an error body.
///
/// JSON bodies go through [`ErrorResponse`]; anything else is passed on as
/// trimmed text, cut to a readable length.
fn error_message(bytes: &[u8]) -> Option<String> {
    if let Ok(body) = serde_json::from_slice::<ErrorResponse>(bytes) {
        return body.message;
    }
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some(text.chars().take(MAX_ERROR_TEXT).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, session: Session) -> ApiClient {
        ApiClient::new(&ClientConfig::with_api_url(server.uri()), session).unwrap()
    }

    #[test]
    fn test_error_message_sources() {
        assert_eq!(
            error_message(br#"{"message": "title required"}"#).as_deref(),
            Some("title required")
        );
        assert_eq!(error_message(b"  plain failure \n").as_deref(), Some("plain failure"));
        assert_eq!(error_message(b""), None);
        assert_eq!(error_message("x".repeat(500).as_bytes()).map(|m| m.len()), Some(200));
    }

    #[tokio::test]
    async fn test_send_attaches_bearer_and_json_headers() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/rules"))
            .and(header("authorization", "Bearer abc"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"title": "No food"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
            .expect(1)
            .mount(&server)
            .await;
        let session = Session::in_memory();
        session.store_token("abc").unwrap();
        let client = client_for(&server, session);

        // Act
        let reply: Reply<serde_json::Value> = client
            .send(Method::POST, "/api/v1/rules", Some(&json!({"title": "No food"})))
            .await
            .unwrap();

        // Assert
        assert_eq!(reply, Reply::Content(json!({"id": 1})));
    }

    #[tokio::test]
    async fn test_no_bearer_without_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/rules"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        let client = client_for(&server, Session::in_memory());

        let _: Reply<Vec<serde_json::Value>> = client
            .send::<(), _>(Method::GET, "/api/v1/rules", None)
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_no_content_and_blank_body_are_empty() {
        let server = MockServer::start().await;
        Mock::given(path("/none"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;
        Mock::given(path("/blank"))
            .respond_with(ResponseTemplate::new(200).set_body_string("  "))
            .mount(&server)
            .await;
        let client = client_for(&server, Session::in_memory());

        let none: Reply<Vec<i64>> = client.send::<(), _>(Method::GET, "/none", None).await.unwrap();
        let blank: Reply<Vec<i64>> = client.send::<(), _>(Method::GET, "/blank", None).await.unwrap();

        assert_eq!(none, Reply::Empty);
        assert_eq!(blank, Reply::Empty);
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        let session = Session::in_memory();
        session.store_token("stale").unwrap();
        let client = client_for(&server, session.clone());

        // Act
        let result: Result<Reply<serde_json::Value>, _> =
            client.send::<(), _>(Method::GET, "/auth/me", None).await;

        // Assert
        assert_eq!(result, Err(ApiError::Unauthenticated));
        assert_eq!(session.token(), None);
    }

    #[tokio::test]
    async fn test_client_errors_carry_backend_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(422).set_body_json(json!({"error": "Unprocessable", "message": "price must be positive"})),
            )
            .mount(&server)
            .await;
        let session = Session::in_memory();
        session.store_token("abc").unwrap();
        let client = client_for(&server, session.clone());

        let result: Result<Reply<serde_json::Value>, _> = client
            .send(Method::POST, "/api/v1/products", Some(&json!({})))
            .await;

        assert_eq!(
            result,
            Err(ApiError::InvalidRequest("price must be positive".to_string()))
        );
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn test_server_error_and_malformed_body_are_unavailable() {
        let server = MockServer::start().await;
        Mock::given(path("/boom"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(path("/garbled"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;
        let client = client_for(&server, Session::in_memory());

        let boom: Result<Reply<serde_json::Value>, _> =
            client.send::<(), _>(Method::GET, "/boom", None).await;
        let garbled: Result<Reply<serde_json::Value>, _> =
            client.send::<(), _>(Method::GET, "/garbled", None).await;

        assert!(matches!(boom, Err(ApiError::Unavailable(_))));
        assert_eq!(garbled, Err(ApiError::Unavailable("malformed response".to_string())));
    }

    #[tokio::test]
    async fn test_unit_request_ignores_text_body() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/products/5"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("Produto deletado com sucesso", "text/plain"),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(path("/denied"))
            .respond_with(ResponseTemplate::new(403).set_body_string("admins only"))
            .mount(&server)
            .await;
        let client = client_for(&server, Session::in_memory());

        // Act
        let deleted = client
            .send_unit::<()>(Method::DELETE, "/api/v1/products/5", None)
            .await;
        let denied = client.send_unit::<()>(Method::GET, "/denied", None).await;

        // Assert
        assert_eq!(deleted, Ok(()));
        assert_eq!(denied, Err(ApiError::Forbidden("admins only".to_string())));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_unavailable() {
        let config = ClientConfig::with_api_url("http://127.0.0.1:9");
        let client = ApiClient::new(&config, Session::in_memory()).unwrap();

        let result: Result<Reply<serde_json::Value>, _> =
            client.send::<(), _>(Method::GET, "/api/v1/rules", None).await;

        assert!(matches!(result, Err(ApiError::Unavailable(_))));
    }
}
