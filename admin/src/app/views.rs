//! # List and Detail Views
//!
//! Fetch state machines shared by every resource page:
//!
//! ```text
//! list:   idle ──load──▶ loading ──▶ ready(items) | error(e)      retry = load
//! detail:        load──▶ loading ──▶ ready(item) | not-found | error(e)
//! ```
//!
//! Deletes are two-step (request, then confirm) and followed by a fresh
//! fetch of the list; nothing is removed locally.

use std::sync::Arc;

use crate::core::error::ApiError;
use crate::core::service::ResourceApi;
use crate::services::api::Resource;

use super::feedback::Feedback;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ApiError),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ViewState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            ViewState::Error(error) => Some(error),
            _ => None,
        }
    }
}

/// Collection page for one resource.
pub struct ListView<R: Resource> {
    api: Arc<dyn ResourceApi<R>>,
    state: ViewState<Vec<R::Entity>>,
    pending_delete: Option<i64>,
    last_failure: Option<ApiError>,
}

impl<R: Resource> ListView<R> {
    pub fn new(api: Arc<dyn ResourceApi<R>>) -> Self {
        Self {
            api,
            state: ViewState::Idle,
            pending_delete: None,
            last_failure: None,
        }
    }

    pub fn state(&self) -> &ViewState<Vec<R::Entity>> {
        &self.state
    }

    /// Loaded items; empty unless the view is ready.
    pub fn items(&self) -> &[R::Entity] {
        self.state.data().map(Vec::as_slice).unwrap_or_default()
    }

    /// The failed delete, or the failed fetch, whichever is more recent.
    pub fn failure(&self) -> Option<&ApiError> {
        self.last_failure.as_ref().or_else(|| self.state.error())
    }

    /// How to present the current failure, if any.
    pub fn feedback(&self) -> Option<Feedback> {
        self.failure().map(Feedback::from)
    }

    #[tracing::instrument(skip(self), fields(resource = R::NAME))]
    pub async fn load(&mut self) -> &ViewState<Vec<R::Entity>> {
        self.state = ViewState::Loading;
        self.last_failure = None;
        self.state = match self.api.list_all().await {
            Ok(items) => ViewState::Ready(items),
            Err(error) => {
                tracing::warn!(error = %error, "List fetch failed");
                ViewState::Error(error)
            }
        };
        &self.state
    }

    /// Re-run the same fetch.
    pub async fn retry(&mut self) -> &ViewState<Vec<R::Entity>> {
        self.load().await
    }

    pub fn request_delete(&mut self, id: i64) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete
    }

    /// Delete the pending item, then reload the list.
    ///
    /// Returns `false` when nothing was pending or the delete failed; the
    /// failure is then available from [`ListView::feedback`].
    #[tracing::instrument(skip(self), fields(resource = R::NAME, id = ?self.pending_delete))]
    pub async fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.pending_delete.take() else {
            return false;
        };
        match self.api.delete(id).await {
            Ok(()) => {
                self.load().await;
                true
            }
            Err(error) => {
                tracing::warn!(error = %error, "Delete failed");
                self.last_failure = Some(error);
                false
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState<T> {
    Loading,
    Ready(T),
    NotFound,
    Error(ApiError),
}

/// Single-entity page.
pub struct DetailView<R: Resource> {
    api: Arc<dyn ResourceApi<R>>,
    id: i64,
    state: DetailState<R::Entity>,
}

impl<R: Resource> DetailView<R> {
    pub fn new(api: Arc<dyn ResourceApi<R>>, id: i64) -> Self {
        Self {
            api,
            id,
            state: DetailState::Loading,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn state(&self) -> &DetailState<R::Entity> {
        &self.state
    }

    pub fn entity(&self) -> Option<&R::Entity> {
        match &self.state {
            DetailState::Ready(entity) => Some(entity),
            _ => None,
        }
    }

    pub fn feedback(&self) -> Option<Feedback> {
        match &self.state {
            DetailState::NotFound => Some(Feedback::NotFound),
            DetailState::Error(error) => Some(Feedback::from(error)),
            DetailState::Loading | DetailState::Ready(_) => None,
        }
    }

    #[tracing::instrument(skip(self), fields(resource = R::NAME, id = self.id))]
    pub async fn load(&mut self) -> &DetailState<R::Entity> {
        self.state = DetailState::Loading;
        self.state = match self.api.get_by_id(self.id).await {
            Ok(entity) => DetailState::Ready(entity),
            Err(ApiError::NotFound) => DetailState::NotFound,
            Err(error) => {
                tracing::warn!(error = %error, "Detail fetch failed");
                DetailState::Error(error)
            }
        };
        &self.state
    }

    pub async fn retry(&mut self) -> &DetailState<R::Entity> {
        self.load().await
    }
}
