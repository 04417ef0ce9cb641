//! # User DTOs
//!
//! Users as returned by `/api/v1/users` and `/auth/me`, plus the write
//! envelope used by the admin user forms.
//!
//! Older backend builds and cached profiles used several names for the same
//! concept. Every accepted alias is listed once in [`RawUser`] and folded by
//! [`normalize_user`]; nothing else in the workspace looks at alias names.

use serde::{Deserialize, Serialize};

/// Role granted to marketplace administrators.
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

/// A marketplace user (also the cached session profile).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", from = "RawUser")]
pub struct User {
    pub id: i64,
    pub full_name: Option<String>,
    /// Institutional e-mail used as login name
    pub username: String,
    pub enrollment_number: Option<String>,
    pub whatsapp_number: Option<String>,
    pub roles: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img_url: Option<String>,
}

impl User {
    /// Name to show for this user, falling back to the login name.
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.username,
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }
}

/// Every field name the backend or a cached profile has used for a user.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawUser {
    id: Option<i64>,
    #[serde(rename = "userId")]
    user_id: Option<i64>,

    #[serde(rename = "fullName")]
    full_name_camel: Option<String>,
    #[serde(rename = "full_name")]
    full_name_snake: Option<String>,
    name: Option<String>,

    username: Option<String>,
    email: Option<String>,

    #[serde(rename = "enrollmentNumber")]
    enrollment_number_camel: Option<String>,
    #[serde(rename = "enrollment_number")]
    enrollment_number_snake: Option<String>,

    #[serde(rename = "whatsappNumber")]
    whatsapp_number: Option<String>,
    whatsapp: Option<String>,

    roles: Option<Vec<String>>,

    #[serde(rename = "imgUrl")]
    img_url_camel: Option<String>,
    #[serde(rename = "img_url")]
    img_url_snake: Option<String>,
}

impl From<RawUser> for User {
    fn from(raw: RawUser) -> Self {
        normalize_user(raw)
    }
}

/// First candidate that is present and not blank.
fn first_filled<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
}

/// Fold a raw user body into the canonical shape.
///
/// Preference order follows the current backend first, then legacy names.
pub fn normalize_user(raw: RawUser) -> User {
    User {
        id: raw.id.or(raw.user_id).unwrap_or_default(),
        full_name: first_filled([raw.full_name_camel, raw.full_name_snake, raw.name]),
        username: first_filled([raw.username, raw.email]).unwrap_or_default(),
        enrollment_number: first_filled([
            raw.enrollment_number_camel,
            raw.enrollment_number_snake,
        ]),
        whatsapp_number: first_filled([raw.whatsapp_number, raw.whatsapp]),
        roles: raw.roles.unwrap_or_default(),
        img_url: first_filled([raw.img_url_camel, raw.img_url_snake]),
    }
}

/// Body for `POST /api/v1/users` and `PUT /api/v1/users/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub full_name: String,
    pub username: String,
    /// Only sent when creating a user or changing the password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub enrollment_number: String,
    pub whatsapp_number: Option<String>,
}

/// Body for `PUT /auth/profile`, the signed-in user's own details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub full_name: String,
    pub username: String,
    /// Digits only
    pub whatsapp_number: Option<String>,
}

impl ProfileUpdate {
    /// Overlay the edited fields on a profile.
    pub fn apply_to(&self, user: &mut User) {
        user.full_name = Some(self.full_name.clone());
        user.username = self.username.clone();
        user.whatsapp_number = self.whatsapp_number.clone();
    }
}

/// Answer to an avatar upload on `/api/v1/users/{id}/avatar`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AvatarResponse {
    #[serde(alias = "imgUrl")]
    pub avatar_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_shape() {
        let user: User = serde_json::from_str(
            r#"{"id": 3, "fullName": "Ana Souza", "username": "ana@ifpb.edu.br",
                "enrollmentNumber": "2021001", "whatsappNumber": "83999887766",
                "roles": ["ROLE_USER", "ROLE_ADMIN"]}"#,
        )
        .unwrap();

        assert_eq!(user.id, 3);
        assert_eq!(user.display_name(), "Ana Souza");
        assert_eq!(user.enrollment_number.as_deref(), Some("2021001"));
        assert!(user.is_admin());
    }

    #[test]
    fn test_legacy_aliases_are_folded() {
        let user: User = serde_json::from_str(
            r#"{"userId": 9, "full_name": "Bruno Lima", "email": "bruno@ifpb.edu.br",
                "whatsapp": "8398887766", "img_url": "https://img/b.png"}"#,
        )
        .unwrap();

        assert_eq!(user.id, 9);
        assert_eq!(user.full_name.as_deref(), Some("Bruno Lima"));
        assert_eq!(user.username, "bruno@ifpb.edu.br");
        assert_eq!(user.whatsapp_number.as_deref(), Some("8398887766"));
        assert_eq!(user.img_url.as_deref(), Some("https://img/b.png"));
        assert!(!user.is_admin());
    }

    #[test]
    fn test_duplicate_aliases_prefer_current_name() {
        let user: User = serde_json::from_str(
            r#"{"id": 1, "fullName": "Carla", "name": "carla", "whatsappNumber": "", "whatsapp": "83911112222"}"#,
        )
        .unwrap();

        assert_eq!(user.full_name.as_deref(), Some("Carla"));
        assert_eq!(user.whatsapp_number.as_deref(), Some("83911112222"));
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let user = User {
            id: 1,
            username: "dora@ifpb.edu.br".to_string(),
            full_name: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "dora@ifpb.edu.br");
    }

    #[test]
    fn test_serialized_profile_reads_back() {
        let user = User {
            id: 5,
            full_name: Some("Eva".to_string()),
            username: "eva@ifpb.edu.br".to_string(),
            roles: vec![ROLE_ADMIN.to_string()],
            ..Default::default()
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"fullName\":\"Eva\""));
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn test_payload_omits_password_when_unset() {
        let payload = UserPayload {
            full_name: "Ana".to_string(),
            username: "ana@ifpb.edu.br".to_string(),
            password: None,
            enrollment_number: "2021001".to_string(),
            whatsapp_number: None,
        };
        let body = serde_json::to_value(&payload).unwrap();
        assert!(body.get("password").is_none());
        assert_eq!(body["enrollmentNumber"], "2021001");
        assert!(body["whatsappNumber"].is_null());
    }

    #[test]
    fn test_profile_update_overlays_edited_fields() {
        let mut user = User {
            id: 3,
            full_name: Some("Ana".to_string()),
            username: "ana@ifpb.edu.br".to_string(),
            roles: vec![ROLE_ADMIN.to_string()],
            img_url: Some("https://img/a.png".to_string()),
            ..Default::default()
        };
        let update = ProfileUpdate {
            full_name: "Ana Souza".to_string(),
            username: "ana.souza@ifpb.edu.br".to_string(),
            whatsapp_number: Some("83999887766".to_string()),
        };

        update.apply_to(&mut user);

        assert_eq!(user.full_name.as_deref(), Some("Ana Souza"));
        assert_eq!(user.username, "ana.souza@ifpb.edu.br");
        assert_eq!(user.whatsapp_number.as_deref(), Some("83999887766"));
        assert!(user.is_admin());
        assert_eq!(user.img_url.as_deref(), Some("https://img/a.png"));
        assert_eq!(
            serde_json::to_value(&update).unwrap()["whatsappNumber"],
            "83999887766"
        );
    }

    #[test]
    fn test_avatar_response_accepts_both_names() {
        let current: AvatarResponse =
            serde_json::from_str(r#"{"avatarUrl": "https://img/a.png"}"#).unwrap();
        let legacy: AvatarResponse =
            serde_json::from_str(r#"{"imgUrl": "https://img/b.png"}"#).unwrap();

        assert_eq!(current.avatar_url.as_deref(), Some("https://img/a.png"));
        assert_eq!(legacy.avatar_url.as_deref(), Some("https://img/b.png"));
    }
}
