//! # User Endpoints
//!
//! Admin management of accounts and avatar images. Self-registration and
//! profile editing live in [`super::auth`].

use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use shared::{AvatarResponse, User, UserPayload};

use super::client::ApiClient;
use super::resource::{Resource, ResourceClient};
use crate::core::error::{AppError, Result};
use crate::services::session::CurrentUser;

/// Largest avatar the backend accepts.
pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

pub struct Users;

impl Resource for Users {
    type Entity = User;
    type Payload = UserPayload;

    const NAME: &'static str = "users";
    const BASE_PATH: &'static str = "/api/v1/users";

    fn id_of(entity: &User) -> i64 {
        entity.id
    }
}

impl Users {
    pub fn avatar_path(id: i64) -> String {
        format!("{}/avatar", Self::item_path(id))
    }
}

impl ApiClient {
    pub fn users(&self) -> ResourceClient<Users> {
        ResourceClient::new(self.clone())
    }
}

/// An image accepted for upload: JPEG, PNG or WebP, at most 5 MB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarImage {
    file_name: String,
    mime: &'static str,
    bytes: Vec<u8>,
}

impl AvatarImage {
    /// Check type (by extension) and size.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let file_name = file_name.into();
        let extension = Path::new(&file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let mime = match extension.as_deref() {
            Some("jpg" | "jpeg") => "image/jpeg",
            Some("png") => "image/png",
            Some("webp") => "image/webp",
            _ => {
                return Err(AppError::Validation(
                    "only JPEG, PNG or WebP images are accepted".to_string(),
                ))
            }
        };
        if bytes.is_empty() {
            return Err(AppError::Validation("image file is empty".to_string()));
        }
        if bytes.len() > MAX_AVATAR_BYTES {
            return Err(AppError::Validation("image must be at most 5 MB".to_string()));
        }

        Ok(Self {
            file_name,
            mime,
            bytes,
        })
    }

    pub async fn read(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            AppError::Validation(format!("cannot read {}: {}", path.display(), e))
        })?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        Self::new(file_name, bytes)
    }

    pub fn mime(&self) -> &str {
        self.mime
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn into_form(self) -> Result<Form> {
        let part = Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(self.mime)
            .map_err(|e| AppError::Validation(format!("invalid image type: {}", e)))?;
        Ok(Form::new().part("file", part))
    }
}

impl ResourceClient<Users> {
    /// Replace a user's avatar and return the new image URL.
    #[tracing::instrument(skip(self, image), fields(user_id = id, size = image.len()))]
    pub async fn upload_avatar(&self, id: i64, image: AvatarImage) -> Result<Option<String>> {
        let url = self
            .api()
            .send_multipart::<AvatarResponse>(Method::POST, &Users::avatar_path(id), image.into_form()?)
            .await?
            .into_option()
            .and_then(|reply| reply.avatar_url);
        self.sync_own_avatar(id, url.clone())?;
        tracing::info!("Avatar uploaded");
        Ok(url)
    }

    #[tracing::instrument(skip(self))]
    pub async fn remove_avatar(&self, id: i64) -> Result<()> {
        self.api()
            .send_unit::<()>(Method::DELETE, &Users::avatar_path(id), None)
            .await?;
        self.sync_own_avatar(id, None)?;
        tracing::info!("Avatar removed");
        Ok(())
    }

    /// Keep the cached profile's image in step when the signed-in user changed their own.
    fn sync_own_avatar(&self, id: i64, url: Option<String>) -> Result<()> {
        let session = self.api().session();
        if let CurrentUser::Authenticated(mut user) = session.current_user() {
            if user.id == id {
                user.img_url = url;
                session.store_profile(&user)?;
            }
        }
        Ok(())
    }
}
