use serde::{Deserialize, Serialize};

/// Login request for `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Institutional e-mail
    pub username: String,
    pub password: String,
}

/// Self-registration request for `POST /auth/register`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub enrollment_number: String,
}

/// Login response. The token has been sent as `token` or `accessToken`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "RawLoginResponse")]
pub struct LoginResponse {
    pub token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLoginResponse {
    token: Option<String>,
    #[serde(rename = "accessToken")]
    access_token: Option<String>,
}

impl From<RawLoginResponse> for LoginResponse {
    fn from(raw: RawLoginResponse) -> Self {
        let token = [raw.token, raw.access_token]
            .into_iter()
            .flatten()
            .find(|token| !token.trim().is_empty());
        LoginResponse { token }
    }
}

/// Error response body. The message has been sent as `message`, `error` or `detail`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "RawErrorResponse")]
pub struct ErrorResponse {
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawErrorResponse {
    message: Option<String>,
    error: Option<String>,
    detail: Option<String>,
}

impl From<RawErrorResponse> for ErrorResponse {
    fn from(raw: RawErrorResponse) -> Self {
        let message = [raw.message, raw.detail, raw.error]
            .into_iter()
            .flatten()
            .find(|message| !message.trim().is_empty());
        ErrorResponse { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_token_names() {
        let current: LoginResponse = serde_json::from_str(r#"{"token": "abc"}"#).unwrap();
        let legacy: LoginResponse = serde_json::from_str(r#"{"accessToken": "def"}"#).unwrap();
        let missing: LoginResponse = serde_json::from_str(r#"{"type": "Bearer"}"#).unwrap();

        assert_eq!(current.token.as_deref(), Some("abc"));
        assert_eq!(legacy.token.as_deref(), Some("def"));
        assert_eq!(missing.token, None);
    }

    #[test]
    fn test_error_message_prefers_message_over_error_title() {
        let body: ErrorResponse = serde_json::from_str(
            r#"{"status": 400, "error": "Bad Request", "message": "price must be positive"}"#,
        )
        .unwrap();
        assert_eq!(body.message.as_deref(), Some("price must be positive"));

        let bare: ErrorResponse = serde_json::from_str(r#"{"error": "Forbidden"}"#).unwrap();
        assert_eq!(bare.message.as_deref(), Some("Forbidden"));
    }

    #[test]
    fn test_register_request_is_camel_case() {
        let request = RegisterRequest {
            username: "ana@ifpb.edu.br".to_string(),
            password: "secret123".to_string(),
            full_name: "Ana Souza".to_string(),
            enrollment_number: "2021001".to_string(),
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["fullName"], "Ana Souza");
        assert_eq!(body["enrollmentNumber"], "2021001");
    }
}
