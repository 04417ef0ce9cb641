//! Login, self-registration and own-profile forms.

use lib_utils::{validate_email, validate_min_length};
use shared::{LoginRequest, ProfileUpdate, RegisterRequest, User};

use super::user::MIN_PASSWORD_LEN;
use super::{optional_phone, required, FormDraft, FormState, SubmitOutcome};
use crate::app::routes::Route;
use crate::core::service::AuthService;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginDraft {
    pub username: String,
    pub password: String,
}

impl FormDraft for LoginDraft {
    type Payload = LoginRequest;

    fn validate(&self) -> Result<LoginRequest, String> {
        let username = required(&self.username, "e-mail")?;
        if self.password.is_empty() {
            return Err("password required".to_string());
        }
        Ok(LoginRequest {
            username,
            password: self.password.clone(),
        })
    }
}

impl FormState<LoginDraft> {
    /// Log in and land on the role's home route.
    pub async fn submit_login(&mut self, auth: &dyn AuthService) -> SubmitOutcome<User> {
        let request = match self.begin_submit() {
            Ok(request) => request,
            Err(outcome) => return outcome,
        };
        let result = auth.login(request.username, request.password).await;
        self.finish(result, Route::after_login)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterDraft {
    pub full_name: String,
    pub username: String,
    pub enrollment_number: String,
    pub password: String,
}

impl FormDraft for RegisterDraft {
    type Payload = RegisterRequest;

    fn validate(&self) -> Result<RegisterRequest, String> {
        let full_name = required(&self.full_name, "full name")?;
        let username = required(&self.username, "e-mail")?;
        validate_email(&username)?;
        let enrollment_number = required(&self.enrollment_number, "enrollment number")?;
        required(&self.password, "password")?;
        validate_min_length(&self.password, MIN_PASSWORD_LEN, "password")?;

        Ok(RegisterRequest {
            username,
            password: self.password.clone(),
            full_name,
            enrollment_number,
        })
    }
}

impl FormState<RegisterDraft> {
    /// Register and send the new user to the login view.
    pub async fn submit_register(&mut self, auth: &dyn AuthService) -> SubmitOutcome<()> {
        let request = match self.begin_submit() {
            Ok(request) => request,
            Err(outcome) => return outcome,
        };
        let result = auth.register(request).await;
        self.finish(result, |_| Route::Login)
    }
}

/// Shortest accepted login name on the profile form.
pub const MIN_USERNAME_LEN: usize = 3;

/// The signed-in user's own details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub full_name: String,
    pub username: String,
    pub whatsapp_number: String,
}

impl ProfileDraft {
    pub fn from_user(user: &User) -> Self {
        Self {
            full_name: user.full_name.clone().unwrap_or_default(),
            username: user.username.clone(),
            whatsapp_number: user.whatsapp_number.clone().unwrap_or_default(),
        }
    }
}

impl FormDraft for ProfileDraft {
    type Payload = ProfileUpdate;

    fn validate(&self) -> Result<ProfileUpdate, String> {
        let full_name = required(&self.full_name, "full name")?;
        let username = required(&self.username, "username")?;
        validate_min_length(&username, MIN_USERNAME_LEN, "username")?;
        let whatsapp_number = optional_phone(&self.whatsapp_number, "WhatsApp number")?;

        Ok(ProfileUpdate {
            full_name,
            username,
            whatsapp_number,
        })
    }
}

impl FormState<ProfileDraft> {
    /// Save the profile and return to the user's own page.
    pub async fn submit_profile(&mut self, auth: &dyn AuthService) -> SubmitOutcome<User> {
        let update = match self.begin_submit() {
            Ok(update) => update,
            Err(outcome) => return outcome,
        };
        let result = auth.update_profile(update).await;
        self.finish(result, |user| Route::UserDetail(user.id))
    }
}
