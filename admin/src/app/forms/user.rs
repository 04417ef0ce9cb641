//! Admin user create/edit form.

use lib_utils::{validate_email, validate_min_length};
use shared::{User, UserPayload};

use super::{optional_phone, required, EditableDraft, FormDraft, ResourceForm};
use crate::app::routes::Route;
use crate::services::api::Users;

pub const MIN_PASSWORD_LEN: usize = 8;

/// User form fields. The password is mandatory when creating and, when
/// editing, only sent if the admin typed a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub full_name: String,
    pub username: String,
    pub enrollment_number: String,
    pub whatsapp_number: String,
    pub password: String,
    creating: bool,
}

impl Default for UserDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl UserDraft {
    pub fn new() -> Self {
        Self {
            full_name: String::new(),
            username: String::new(),
            enrollment_number: String::new(),
            whatsapp_number: String::new(),
            password: String::new(),
            creating: true,
        }
    }

    pub fn is_new(&self) -> bool {
        self.creating
    }
}

impl FormDraft for UserDraft {
    type Payload = UserPayload;

    fn validate(&self) -> Result<UserPayload, String> {
        let full_name = required(&self.full_name, "full name")?;
        let username = required(&self.username, "e-mail")?;
        validate_email(&username)?;
        let enrollment_number = required(&self.enrollment_number, "enrollment number")?;
        let whatsapp_number = optional_phone(&self.whatsapp_number, "WhatsApp number")?;

        let password = if self.creating {
            required(&self.password, "password")?;
            validate_min_length(&self.password, MIN_PASSWORD_LEN, "password")?;
            Some(self.password.clone())
        } else if self.password.is_empty() {
            None
        } else {
            validate_min_length(&self.password, MIN_PASSWORD_LEN, "password")?;
            Some(self.password.clone())
        };

        Ok(UserPayload {
            full_name,
            username,
            password,
            enrollment_number,
            whatsapp_number,
        })
    }
}

impl ResourceForm for UserDraft {
    type Resource = Users;

    fn saved_route(_saved: &User) -> Route {
        Route::Users
    }
}

impl EditableDraft for UserDraft {
    fn from_entity(user: &User) -> Self {
        Self {
            full_name: user.full_name.clone().unwrap_or_default(),
            username: user.username.clone(),
            enrollment_number: user.enrollment_number.clone().unwrap_or_default(),
            whatsapp_number: user.whatsapp_number.clone().unwrap_or_default(),
            password: String::new(),
            creating: false,
        }
    }
}
