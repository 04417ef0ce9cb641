//! Rule create/edit form.

use shared::{Rule, RulePayload};

use super::{required, EditableDraft, FormDraft, ResourceForm};
use crate::app::routes::Route;
use crate::services::api::Rules;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDraft {
    pub title: String,
    pub description: String,
    pub active: bool,
}

impl Default for RuleDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            active: true,
        }
    }
}

impl FormDraft for RuleDraft {
    type Payload = RulePayload;

    fn validate(&self) -> Result<RulePayload, String> {
        Ok(RulePayload {
            title: required(&self.title, "title")?,
            description: required(&self.description, "description")?,
            active: self.active,
        })
    }
}

impl ResourceForm for RuleDraft {
    type Resource = Rules;

    fn saved_route(_saved: &Rule) -> Route {
        Route::Rules
    }
}

impl EditableDraft for RuleDraft {
    fn from_entity(rule: &Rule) -> Self {
        Self {
            title: rule.title.clone(),
            description: rule.description.clone(),
            active: rule.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::forms::testing::FakeApi;
    use crate::app::forms::{FormMode, FormState, SubmitOutcome};

    fn build(id: i64, payload: &RulePayload) -> Rule {
        Rule {
            id,
            title: payload.title.clone(),
            description: payload.description.clone(),
            active: payload.active,
            created_at: Some("2024-03-01T10:15:30".to_string()),
        }
    }

    #[test]
    fn test_new_rule_is_active() {
        assert!(RuleDraft::default().active);
    }

    #[tokio::test]
    async fn test_edit_round_trip_is_idempotent() {
        let stored = build(
            5,
            &RulePayload {
                title: "No food".to_string(),
                description: "Food items cannot be advertised".to_string(),
                active: false,
            },
        );
        let api = FakeApi::<Rules>::new(build).with([stored.clone()]);

        let mut form = FormState::<RuleDraft>::load(&api, 5).await.unwrap();
        assert_eq!(form.mode(), FormMode::Edit(5));
        let outcome = form.submit(&api).await;

        assert_eq!(
            outcome,
            SubmitOutcome::Saved {
                value: stored,
                navigate: Route::Rules
            }
        );
    }

    #[tokio::test]
    async fn test_missing_title() {
        let api = FakeApi::<Rules>::new(build);
        let mut form = FormState::create(RuleDraft::default());
        form.edit().description = "Be kind".to_string();

        let outcome = form.submit(&api).await;

        assert_eq!(outcome, SubmitOutcome::Invalid("title required".to_string()));
    }
}
