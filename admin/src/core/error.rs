//! # Common Error Types
//!
//! Consolidated error handling for the admin client.
//!
//! ## Error Categories
//!
//! [`ApiError`] is the closed taxonomy every backend call fails with:
//!
//! | Status                  | Variant           |
//! |-------------------------|-------------------|
//! | 401                     | `Unauthenticated` |
//! | 403                     | `Forbidden`       |
//! | 404                     | `NotFound`        |
//! | 400, 422, other 4xx     | `InvalidRequest`  |
//! | 5xx, transport, timeout | `Unavailable`     |
//!
//! [`AppError`] wraps it together with the failures that happen on this side
//! of the wire (validation, session storage, configuration).
//!
//! ## Error Conversion
//!
//! - `ApiError` → `AppError::Api`
//! - `std::io::Error` → `AppError::Session` (the session file is the only disk I/O)

use reqwest::StatusCode;
use thiserror::Error;

/// Classified failure of a backend call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The backend rejected or did not receive a valid bearer token.
    ///
    /// The HTTP wrapper has already cleared the stored session when this is
    /// returned; callers navigate to the login view.
    #[error("Session expired or missing, please log in again")]
    Unauthenticated,

    /// Authenticated, but not allowed to perform the operation.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// The addressed resource does not exist.
    #[error("Resource not found")]
    NotFound,

    /// The backend refused the request body (400, 422 and other 4xx).
    ///
    /// Carries the backend's own message when one was sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Server error, transport failure, timeout or malformed response.
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl ApiError {
    /// Classify a non-success status code.
    ///
    /// `message` is the backend's error text, if the body carried one.
    pub fn from_status(status: StatusCode, message: Option<String>) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthenticated,
            StatusCode::FORBIDDEN => ApiError::Forbidden(
                message.unwrap_or_else(|| "you do not have permission for this operation".to_string()),
            ),
            StatusCode::NOT_FOUND => ApiError::NotFound,
            s if s.is_client_error() => {
                ApiError::InvalidRequest(message.unwrap_or_else(|| reason_phrase(s)))
            }
            s if s.is_server_error() => ApiError::Unavailable(format!(
                "backend error {}: {}",
                s.as_u16(),
                message.unwrap_or_else(|| reason_phrase(s))
            )),
            s => ApiError::Unavailable(format!("unexpected status {}", s.as_u16())),
        }
    }

    /// Classify a failure that happened before a status line was read.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Unavailable("request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Unavailable("could not connect to the backend".to_string())
        } else {
            ApiError::Unavailable(err.to_string())
        }
    }

    /// Stable short name, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Unauthenticated => "unauthenticated",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::NotFound => "not_found",
            ApiError::InvalidRequest(_) => "invalid_request",
            ApiError::Unavailable(_) => "unavailable",
        }
    }
}

fn reason_phrase(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or("unknown error").to_string()
}

/// Application-wide error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// Backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Local input validation failed; nothing was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Session store could not be read or written.
    #[error("Session error: {0}")]
    Session(String),

    /// Startup configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Session(err.to_string())
    }
}

impl From<lib_utils::envs::Error> for AppError {
    fn from(err: lib_utils::envs::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, Some("expired".into())),
            ApiError::Unauthenticated
        );
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, None),
            ApiError::Forbidden(_)
        ));
        assert_eq!(ApiError::from_status(StatusCode::NOT_FOUND, None), ApiError::NotFound);
        assert_eq!(
            ApiError::from_status(StatusCode::BAD_REQUEST, Some("title required".into())),
            ApiError::InvalidRequest("title required".into())
        );
        assert_eq!(
            ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, None),
            ApiError::InvalidRequest("Unprocessable Entity".into())
        );
        assert!(matches!(
            ApiError::from_status(StatusCode::CONFLICT, None),
            ApiError::InvalidRequest(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, None),
            ApiError::Unavailable(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, None),
            ApiError::Unavailable(_)
        ));
    }

    #[test]
    fn test_forbidden_keeps_backend_message() {
        let err = ApiError::from_status(StatusCode::FORBIDDEN, Some("admins only".into()));
        assert_eq!(err.to_string(), "Access denied: admins only");
    }

    #[test]
    fn test_app_error_wraps_api_error_transparently() {
        let err: AppError = ApiError::NotFound.into();
        assert_eq!(err.to_string(), "Resource not found");
    }
}
