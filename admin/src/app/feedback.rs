//! How a failed call is shown to the user.

use crate::core::error::{ApiError, AppError};

use super::routes::Route;

/// Presentation decision for a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// Leave the current view.
    Redirect(Route),
    /// Show a message and keep the view editable.
    Notice(String),
    /// Show the not-found state.
    NotFound,
    /// Show the message with a retry affordance.
    Retry(String),
}

impl From<&ApiError> for Feedback {
    fn from(error: &ApiError) -> Self {
        match error {
            ApiError::Unauthenticated => Feedback::Redirect(Route::Login),
            ApiError::Forbidden(_) | ApiError::InvalidRequest(_) => Feedback::Notice(error.to_string()),
            ApiError::NotFound => Feedback::NotFound,
            ApiError::Unavailable(_) => Feedback::Retry(error.to_string()),
        }
    }
}

impl From<&AppError> for Feedback {
    fn from(error: &AppError) -> Self {
        match error {
            AppError::Api(api) => api.into(),
            AppError::Validation(message) => Feedback::Notice(message.clone()),
            AppError::Session(_) | AppError::Config(_) => Feedback::Notice(error.to_string()),
        }
    }
}

impl Feedback {
    pub fn message(&self) -> Option<&str> {
        match self {
            Feedback::Notice(message) | Feedback::Retry(message) => Some(message),
            Feedback::Redirect(_) | Feedback::NotFound => None,
        }
    }
}
