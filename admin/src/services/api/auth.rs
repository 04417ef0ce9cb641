//! # Authentication Endpoints
//!
//! Login, profile refresh and editing, self-registration and logout.

use reqwest::Method;
use shared::{LoginRequest, LoginResponse, ProfileUpdate, RegisterRequest, User};

use super::client::ApiClient;
use crate::core::error::{ApiError, Result};
use crate::core::service::AuthService;

pub const LOGIN_PATH: &str = "/auth/login";
pub const ME_PATH: &str = "/auth/me";
pub const REGISTER_PATH: &str = "/auth/register";
pub const PROFILE_PATH: &str = "/auth/profile";

/// Login with institutional e-mail and password.
///
/// On success the token and the freshly fetched profile are both stored.
/// If the profile cannot be fetched the session is left empty.
#[tracing::instrument(skip(client, password), fields(username = %username))]
pub async fn login(client: &ApiClient, username: String, password: String) -> Result<User> {
    tracing::info!("Attempting login");
    let start = std::time::Instant::now();

    let request = LoginRequest { username, password };
    let response = client
        .send::<LoginRequest, LoginResponse>(Method::POST, LOGIN_PATH, Some(&request))
        .await?
        .into_option()
        .unwrap_or_default();

    let token = response.token.ok_or_else(|| {
        tracing::error!("Login response carried no token");
        ApiError::InvalidRequest("login response carried no token".to_string())
    })?;
    client.session().store_token(&token)?;

    let user = match me(client).await {
        Ok(user) => user,
        Err(e) => {
            client.session().clear()?;
            return Err(e);
        }
    };

    tracing::info!(
        user_id = user.id,
        admin = user.is_admin(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Login successful"
    );
    Ok(user)
}

/// Fetch the authenticated user's profile and refresh the cached copy.
#[tracing::instrument(skip(client))]
pub async fn me(client: &ApiClient) -> Result<User> {
    let user = client
        .send::<(), User>(Method::GET, ME_PATH, None)
        .await?
        .into_option()
        .ok_or(ApiError::NotFound)?;
    client.session().store_profile(&user)?;
    Ok(user)
}

/// Create a new account. The caller logs in separately afterwards.
#[tracing::instrument(skip(client, request), fields(username = %request.username))]
pub async fn register(client: &ApiClient, request: RegisterRequest) -> Result<()> {
    client
        .send_unit(Method::POST, REGISTER_PATH, Some(&request))
        .await?;
    tracing::info!("Registration accepted");
    Ok(())
}

/// Edit the signed-in user's own details.
///
/// The cached profile becomes the saved user (or the previous cached copy
/// when the answer has no body) with the edited fields laid over it.
#[tracing::instrument(skip(client, update), fields(username = %update.username))]
pub async fn update_profile(client: &ApiClient, update: ProfileUpdate) -> Result<User> {
    let saved = client
        .send::<ProfileUpdate, User>(Method::PUT, PROFILE_PATH, Some(&update))
        .await?
        .into_option();

    let mut user = match saved {
        Some(user) if user.id != 0 => user,
        _ => client
            .session()
            .current_user()
            .user()
            .cloned()
            .unwrap_or_default(),
    };
    update.apply_to(&mut user);
    client.session().store_profile(&user)?;

    tracing::info!(user_id = user.id, "Profile updated");
    Ok(user)
}

pub fn logout(client: &ApiClient) -> Result<()> {
    client.session().clear()?;
    tracing::info!("Logged out");
    Ok(())
}

#[async_trait::async_trait]
impl AuthService for ApiClient {
    async fn login(&self, username: String, password: String) -> Result<User> {
        login(self, username, password).await
    }

    async fn me(&self) -> Result<User> {
        me(self).await
    }

    async fn register(&self, request: RegisterRequest) -> Result<()> {
        register(self, request).await
    }

    async fn update_profile(&self, update: ProfileUpdate) -> Result<User> {
        update_profile(self, update).await
    }

    fn logout(&self) -> Result<()> {
        logout(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::core::error::AppError;
    use crate::services::session::Session;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&ClientConfig::with_api_url(server.uri()), Session::in_memory()).unwrap()
    }

    #[tokio::test]
    async fn test_login_stores_token_and_profile() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(json!({"username": "ana@ifpb.edu.br", "password": "secret123"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "tok-1"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .and(header("authorization", "Bearer tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 3, "fullName": "Ana Souza", "username": "ana@ifpb.edu.br", "roles": ["ROLE_ADMIN"]
            })))
            .expect(1)
            .mount(&server)
            .await;
        let client = client_for(&server);

        // Act
        let user = AuthService::login(&client, "ana@ifpb.edu.br".into(), "secret123".into())
            .await
            .unwrap();

        // Assert
        assert_eq!(user.id, 3);
        assert_eq!(client.session().token().as_deref(), Some("tok-1"));
        assert!(client.session().is_admin());
    }

    #[tokio::test]
    async fn test_login_without_token_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"type": "Bearer"})))
            .mount(&server)
            .await;
        let client = client_for(&server);

        let result = login(&client, "ana@ifpb.edu.br".into(), "secret123".into()).await;

        assert!(matches!(result, Err(AppError::Api(ApiError::InvalidRequest(_)))));
        assert!(!client.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_wrong_credentials_leave_session_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        let client = client_for(&server);

        let result = login(&client, "ana@ifpb.edu.br".into(), "wrong".into()).await;

        assert!(matches!(result, Err(AppError::Api(ApiError::Unauthenticated))));
        assert!(!client.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_failed_profile_fetch_clears_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "tok-2"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let client = client_for(&server);

        let result = login(&client, "ana@ifpb.edu.br".into(), "secret123".into()).await;

        assert!(matches!(result, Err(AppError::Api(ApiError::Unavailable(_)))));
        assert_eq!(client.session().token(), None);
    }

    #[tokio::test]
    async fn test_register_posts_camel_case_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/register"))
            .and(body_json(json!({
                "username": "bruno@ifpb.edu.br",
                "password": "secret123",
                "fullName": "Bruno Lima",
                "enrollmentNumber": "2022002"
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;
        let client = client_for(&server);

        let request = RegisterRequest {
            username: "bruno@ifpb.edu.br".into(),
            password: "secret123".into(),
            full_name: "Bruno Lima".into(),
            enrollment_number: "2022002".into(),
        };

        assert!(register(&client, request).await.is_ok());
    }

    #[tokio::test]
    async fn test_register_accepts_text_confirmation() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/register"))
            .respond_with(
                ResponseTemplate::new(201).set_body_raw("User registered successfully", "text/plain"),
            )
            .expect(1)
            .mount(&server)
            .await;
        let client = client_for(&server);
        let request = RegisterRequest {
            username: "bruno@ifpb.edu.br".into(),
            password: "secret123".into(),
            full_name: "Bruno Lima".into(),
            enrollment_number: "2022002".into(),
        };

        // Act
        let result = AuthService::register(&client, request).await;

        // Assert
        assert_eq!(result, Ok(()));
    }

    fn signed_in_as_ana(client: &ApiClient) {
        let cached = User {
            id: 3,
            full_name: Some("Ana".into()),
            username: "ana@ifpb.edu.br".into(),
            roles: vec![shared::ROLE_ADMIN.into()],
            img_url: Some("https://img/a.png".into()),
            ..Default::default()
        };
        client.session().store_login("tok-1", &cached).unwrap();
    }

    fn profile_update() -> ProfileUpdate {
        ProfileUpdate {
            full_name: "Ana Souza".into(),
            username: "ana.souza@ifpb.edu.br".into(),
            whatsapp_number: Some("83999887766".into()),
        }
    }

    #[tokio::test]
    async fn test_update_profile_refreshes_cached_profile() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/auth/profile"))
            .and(header("authorization", "Bearer tok-1"))
            .and(body_json(json!({
                "fullName": "Ana Souza",
                "username": "ana.souza@ifpb.edu.br",
                "whatsappNumber": "83999887766"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 3, "fullName": "Ana Souza", "username": "ana.souza@ifpb.edu.br",
                "roles": ["ROLE_ADMIN"], "imgUrl": "https://img/a.png"
            })))
            .expect(1)
            .mount(&server)
            .await;
        let client = client_for(&server);
        signed_in_as_ana(&client);

        // Act
        let user = AuthService::update_profile(&client, profile_update()).await.unwrap();

        // Assert
        assert_eq!(user.display_name(), "Ana Souza");
        assert_eq!(user.whatsapp_number.as_deref(), Some("83999887766"));
        let cached = client.session().current_user();
        assert_eq!(cached.user(), Some(&user));
        assert!(client.session().is_admin());
    }

    #[tokio::test]
    async fn test_update_profile_without_body_keeps_roles_and_avatar() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/auth/profile"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;
        let client = client_for(&server);
        signed_in_as_ana(&client);

        // Act
        let user = update_profile(&client, profile_update()).await.unwrap();

        // Assert
        assert_eq!(user.id, 3);
        assert_eq!(user.username, "ana.souza@ifpb.edu.br");
        assert_eq!(user.img_url.as_deref(), Some("https://img/a.png"));
        assert!(user.is_admin());
        assert_eq!(client.session().current_user().user(), Some(&user));
    }

    #[tokio::test]
    async fn test_rejected_profile_edit_leaves_cache_alone() {
        // Arrange
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/auth/profile"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "username taken"})))
            .mount(&server)
            .await;
        let client = client_for(&server);
        signed_in_as_ana(&client);

        // Act
        let result = update_profile(&client, profile_update()).await;

        // Assert
        assert_eq!(
            result,
            Err(AppError::Api(ApiError::InvalidRequest("username taken".into())))
        );
        assert_eq!(client.session().current_user().display_name(), "Ana");
    }

    #[test]
    fn test_logout_clears_session() {
        let client = ApiClient::new(&ClientConfig::default(), Session::in_memory()).unwrap();
        client.session().store_token("tok").unwrap();

        AuthService::logout(&client).unwrap();

        assert!(!client.session().is_authenticated());
    }
}
