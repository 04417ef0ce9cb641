//! # Rule DTOs

use serde::{Deserialize, Serialize};

fn default_active() -> bool {
    true
}

/// A marketplace usage rule shown to users.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body for `POST /api/v1/rules` and `PUT /api/v1/rules/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RulePayload {
    pub title: String,
    pub description: String,
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_active_defaults_to_true() {
        let rule: Rule = serde_json::from_str(r#"{"id": 1, "title": "Be kind"}"#).unwrap();
        assert!(rule.active);
        assert_eq!(rule.created_at, None);
    }
}
