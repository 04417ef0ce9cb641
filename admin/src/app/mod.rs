//! # Application Layer
//!
//! Presentation-independent state machines of the admin front-end. The CLI
//! drives them today; a GUI or web front-end can drive the same types.
//!
//! - [`routes`]: navigation targets and the login guard
//! - [`forms`]: validating drafts and the submit lifecycle
//! - [`views`]: list and detail fetch lifecycles, delete confirmation
//! - [`filters`]: client-side search, filters and sorting
//! - [`feedback`]: how each failure kind is presented

pub mod feedback;
pub mod filters;
pub mod forms;
pub mod routes;
pub mod views;

pub use feedback::Feedback;
pub use forms::{FormMode, FormPhase, FormState, SubmitOutcome};
pub use routes::Route;
pub use views::{DetailState, DetailView, ListView, ViewState};
