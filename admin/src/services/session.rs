//! # Session
//!
//! The one place that reads or writes the bearer token and the cached
//! profile. Everything else asks [`Session`].
//!
//! Two stores are provided:
//! - [`MemoryStore`]: lives as long as the process, used by tests
//! - [`FileStore`]: a JSON file on disk, so the CLI stays logged in between runs

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lib_utils::{b64u_decode_to_string, now_utc};
use parking_lot::RwLock;
use shared::User;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::core::error::{AppError, Result};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Opaque key-value storage behind the session.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

// region:    --- MemoryStore

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}

// endregion: --- MemoryStore

// region:    --- FileStore

/// Session entries persisted as a flat JSON object.
///
/// The whole file is rewritten on every change. A file that cannot be parsed
/// is treated as an empty session and overwritten on the next login.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let content = fs::read_to_string(&path)?;
            match serde_json::from_str::<HashMap<String, String>>(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Session file unreadable, starting empty");
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        debug!(path = %path.display(), entries = entries.len(), "Session file opened");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the file atomically: write a sibling temp file readable only
    /// by the owner, then rename it over the old one.
    fn persist(&self, entries: &HashMap<String, String>) -> Result<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;
        let content = serde_json::to_vec_pretty(entries)
            .map_err(|e| AppError::Session(format!("failed to encode session: {}", e)))?;

        let mut file = NamedTempFile::new_in(parent)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.as_file()
                .set_permissions(fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(&content)?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write();
        let mut next = entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write();
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}

// endregion: --- FileStore

/// Who is using the client right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentUser {
    Anonymous,
    Authenticated(User),
}

impl CurrentUser {
    pub fn user(&self) -> Option<&User> {
        match self {
            CurrentUser::Anonymous => None,
            CurrentUser::Authenticated(user) => Some(user),
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.user().map(|user| user.id)
    }

    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(User::is_admin)
    }

    pub fn display_name(&self) -> &str {
        match self {
            CurrentUser::Anonymous => "anonymous",
            CurrentUser::Authenticated(user) => user.display_name(),
        }
    }
}

/// Session accessor, cheap to clone and shared by every component.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl Session {
    pub fn new(store: impl SessionStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    pub fn open_file(path: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self::new(FileStore::open(path)?))
    }

    /// The bearer token, if one is stored and still usable.
    ///
    /// Placeholder values left behind by older front-ends (`""`, `"null"`,
    /// `"undefined"`) count as absent, and so does a JWT past its `exp`.
    pub fn token(&self) -> Option<String> {
        let token = self.store.get(TOKEN_KEY)?;
        let trimmed = token.trim();
        if trimmed.is_empty() || trimmed == "null" || trimmed == "undefined" {
            return None;
        }
        if is_expired(trimmed) {
            debug!("Stored token has expired");
            return None;
        }
        Some(trimmed.to_string())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// The cached profile, or [`CurrentUser::Anonymous`] when there is no
    /// usable token or the cached profile cannot be read.
    pub fn current_user(&self) -> CurrentUser {
        if !self.is_authenticated() {
            return CurrentUser::Anonymous;
        }
        let Some(raw) = self.store.get(USER_KEY) else {
            return CurrentUser::Anonymous;
        };
        match serde_json::from_str::<User>(&raw) {
            Ok(user) => CurrentUser::Authenticated(user),
            Err(e) => {
                warn!(error = %e, "Cached profile is unreadable");
                CurrentUser::Anonymous
            }
        }
    }

    pub fn store_login(&self, token: &str, user: &User) -> Result<()> {
        self.store_token(token)?;
        self.store_profile(user)
    }

    pub fn store_token(&self, token: &str) -> Result<()> {
        self.store.set(TOKEN_KEY, token)
    }

    pub fn store_profile(&self, user: &User) -> Result<()> {
        let raw = serde_json::to_string(user)
            .map_err(|e| AppError::Session(format!("failed to encode profile: {}", e)))?;
        self.store.set(USER_KEY, &raw)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_KEY)
    }

    /// Whether the session user owns a resource. Anonymous owns nothing.
    pub fn is_owner(&self, owner_id: Option<i64>) -> bool {
        match (self.current_user().id(), owner_id) {
            (Some(me), Some(owner)) => me == owner,
            _ => false,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.current_user().is_admin()
    }
}

/// Reads the `exp` claim of a JWT. Tokens that are not JWTs never expire here;
/// the backend remains the authority and answers 401.
fn is_expired(token: &str) -> bool {
    let mut segments = token.split('.');
    let (Some(_header), Some(claims), Some(_signature), None) =
        (segments.next(), segments.next(), segments.next(), segments.next())
    else {
        return false;
    };

    let exp = b64u_decode_to_string(claims)
        .ok()
        .and_then(|json| serde_json::from_str::<serde_json::Value>(&json).ok())
        .and_then(|claims| claims.get("exp").and_then(serde_json::Value::as_i64));

    match exp {
        Some(exp) => exp <= now_utc().timestamp(),
        None => false,
    }
}
