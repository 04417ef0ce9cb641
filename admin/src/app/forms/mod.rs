//! # Forms
//!
//! Each form is a draft of plain user input wrapped in a [`FormState`]:
//!
//! ```text
//! idle ──edit──▶ editing ──submit──▶ submitting ──ok──▶ succeeded (navigate)
//!                   ▲                     │
//!                   └──── error ◀─────────┘
//! ```
//!
//! Validation is local and synchronous. A draft that fails validation never
//! reaches the network, and a second submit while one is in flight is refused.

pub mod advertisement;
pub mod auth;
pub mod product;
pub mod rule;
pub mod selection;
pub mod user;

pub use advertisement::AdvertisementDraft;
pub use auth::{LoginDraft, ProfileDraft, RegisterDraft};
pub use product::ProductDraft;
pub use rule::RuleDraft;
pub use selection::ProductSelection;
pub use user::UserDraft;

use crate::core::error::AppError;
use crate::core::service::ResourceApi;
use crate::services::api::Resource;

use super::feedback::Feedback;
use super::routes::Route;

/// User input that can be checked and reshaped into a request body.
pub trait FormDraft {
    type Payload;

    /// Validate and build the request body, or return the first problem.
    fn validate(&self) -> Result<Self::Payload, String>;
}

/// A draft that creates or replaces one backend resource.
pub trait ResourceForm: FormDraft<Payload = <Self::Resource as Resource>::Payload> {
    type Resource: Resource;

    /// Where to go once the backend accepted the draft.
    fn saved_route(saved: &<Self::Resource as Resource>::Entity) -> Route;
}

/// A draft that can be pre-filled from an existing entity.
///
/// Submitting a freshly loaded draft unchanged sends back the entity's own
/// field values.
pub trait EditableDraft: ResourceForm + Sized {
    fn from_entity(entity: &<Self::Resource as Resource>::Entity) -> Self;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Editing,
    Submitting,
    Succeeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

/// Result of one submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<T> {
    Saved { value: T, navigate: Route },
    /// Validation failed locally; nothing was sent.
    Invalid(String),
    /// The backend (or the session store) refused.
    Failed(AppError),
    /// A submit is already in flight.
    Busy,
}

impl<T> SubmitOutcome<T> {
    pub fn is_saved(&self) -> bool {
        matches!(self, SubmitOutcome::Saved { .. })
    }

    /// How to present a refusal. `None` for saved outcomes.
    pub fn feedback(&self) -> Option<Feedback> {
        match self {
            SubmitOutcome::Saved { .. } => None,
            SubmitOutcome::Invalid(message) => Some(Feedback::Notice(message.clone())),
            SubmitOutcome::Failed(error) => Some(Feedback::from(error)),
            SubmitOutcome::Busy => Some(Feedback::Notice("submission in progress".to_string())),
        }
    }

    /// Saved value, or the refusal as an error.
    pub fn into_result(self) -> Result<T, AppError> {
        match self {
            SubmitOutcome::Saved { value, .. } => Ok(value),
            SubmitOutcome::Invalid(message) => Err(AppError::Validation(message)),
            SubmitOutcome::Failed(error) => Err(error),
            SubmitOutcome::Busy => Err(AppError::Validation("submission in progress".to_string())),
        }
    }
}

/// Form lifecycle around a draft.
#[derive(Debug, Clone)]
pub struct FormState<D> {
    draft: D,
    mode: FormMode,
    phase: FormPhase,
    error: Option<String>,
}

impl<D: FormDraft> FormState<D> {
    pub fn create(draft: D) -> Self {
        Self {
            draft,
            mode: FormMode::Create,
            phase: FormPhase::Idle,
            error: None,
        }
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    /// Mutable access to the draft. Moves an idle or finished form to editing.
    pub fn edit(&mut self) -> &mut D {
        if matches!(self.phase, FormPhase::Idle | FormPhase::Succeeded) {
            self.phase = FormPhase::Editing;
        }
        &mut self.draft
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    /// Validate and enter `submitting`.
    ///
    /// `Err` carries the outcome to report instead of sending: `Busy` while
    /// another submit is in flight, `Invalid` when the draft fails validation.
    pub fn begin_submit<T>(&mut self) -> Result<D::Payload, SubmitOutcome<T>> {
        if self.is_submitting() {
            return Err(SubmitOutcome::Busy);
        }
        match self.draft.validate() {
            Ok(payload) => {
                self.phase = FormPhase::Submitting;
                self.error = None;
                Ok(payload)
            }
            Err(message) => {
                self.phase = FormPhase::Editing;
                self.error = Some(message.clone());
                Err(SubmitOutcome::Invalid(message))
            }
        }
    }

    /// Leave `submitting` with the backend's answer.
    pub fn finish<T>(
        &mut self,
        result: Result<T, AppError>,
        navigate: impl FnOnce(&T) -> Route,
    ) -> SubmitOutcome<T> {
        match result {
            Ok(value) => {
                self.phase = FormPhase::Succeeded;
                self.error = None;
                let navigate = navigate(&value);
                SubmitOutcome::Saved { value, navigate }
            }
            Err(error) => {
                tracing::warn!(error = %error, "Form submit failed");
                let feedback = Feedback::from(&error);
                self.phase = FormPhase::Editing;
                self.error = Some(feedback.message().map_or_else(|| error.to_string(), str::to_string));
                SubmitOutcome::Failed(error)
            }
        }
    }
}

impl<D: EditableDraft> FormState<D> {
    /// Form pre-filled from a fetched entity, submitting as an update.
    pub fn for_edit(id: i64, entity: &<D::Resource as Resource>::Entity) -> Self {
        Self {
            draft: D::from_entity(entity),
            mode: FormMode::Edit(id),
            phase: FormPhase::Idle,
            error: None,
        }
    }

    /// Fetch the entity and build an edit form from it.
    pub async fn load(
        api: &dyn ResourceApi<D::Resource>,
        id: i64,
    ) -> Result<Self, AppError> {
        let entity = api.get_by_id(id).await?;
        Ok(Self::for_edit(id, &entity))
    }
}

impl<D: ResourceForm> FormState<D> {
    /// Validate, then create or update through `api`.
    pub async fn submit(
        &mut self,
        api: &dyn ResourceApi<D::Resource>,
    ) -> SubmitOutcome<<D::Resource as Resource>::Entity> {
        let payload = match self.begin_submit() {
            Ok(payload) => payload,
            Err(outcome) => return outcome,
        };

        let result = match self.mode {
            FormMode::Create => api.create(&payload).await,
            FormMode::Edit(id) => api.update(id, &payload).await,
        };
        self.finish(result.map_err(AppError::from), D::saved_route)
    }
}

/// Required text field, trimmed.
pub(crate) fn required(value: &str, field: &str) -> Result<String, String> {
    lib_utils::validate_not_empty(value, field)?;
    Ok(value.trim().to_string())
}

/// Optional phone field: blank is `None`, otherwise 10 or 11 digits sent bare.
pub(crate) fn optional_phone(value: &str, field: &str) -> Result<Option<String>, String> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    lib_utils::validate_phone_digits(value, 10, 11, field)?;
    Ok(Some(lib_utils::digits_only(value)))
}
