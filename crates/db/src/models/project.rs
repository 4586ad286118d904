//! Project entity model and DTOs.

use estoes_core::assignment::{dedup_user_ids, UserIds};
use estoes_core::types::{DbId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A project row from the `projects` table, joined with its assignments.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub project_manager: String,
    pub status: String,
    /// User ids from `project_user`, ascending.
    pub assigned_to: Vec<UserId>,
}

/// DTO for creating a project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: String,
    pub project_manager: String,
    #[validate(length(max = 64))]
    pub status: String,
    /// Absent, `null` and `[]` all mean "no assignments".
    #[serde(default)]
    pub assigned_to: Option<Vec<UserId>>,
}

/// Updates overwrite every column and the whole assignment set, so they
/// take the same shape as creates.
pub type UpdateProject = CreateProject;

impl CreateProject {
    /// Assignment set to write, de-duplicated.
    pub fn user_ids(&self) -> Vec<UserId> {
        self.assigned_to
            .as_deref()
            .map(dedup_user_ids)
            .unwrap_or_default()
    }
}

/// Body of `POST /projects/{id}/users`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AssignUsers {
    #[serde(rename = "userIds")]
    pub user_ids: UserIds,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(assigned_to: serde_json::Value) -> CreateProject {
        serde_json::from_value(serde_json::json!({
            "name": "Alpha",
            "description": "d",
            "project_manager": "pm1",
            "status": "open",
            "assigned_to": assigned_to,
        }))
        .unwrap()
    }

    #[test]
    fn null_assigned_to_means_no_users() {
        assert!(input(serde_json::Value::Null).user_ids().is_empty());
    }

    #[test]
    fn assigned_to_is_deduplicated() {
        assert_eq!(input(serde_json::json!([10, 11, 10])).user_ids(), vec![10, 11]);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let parsed: CreateProject = serde_json::from_value(serde_json::json!({
            "name": "Alpha",
            "description": "d",
            "project_manager": "pm1",
            "status": "open",
            "priority": "high",
        }))
        .unwrap();
        assert!(parsed.assigned_to.is_none());
    }

    #[test]
    fn empty_name_fails_validation() {
        let mut parsed = input(serde_json::Value::Null);
        parsed.name = String::new();
        assert!(parsed.validate().is_err());
    }

    #[test]
    fn assign_users_accepts_bare_integer() {
        let parsed: AssignUsers = serde_json::from_str(r#"{"userIds": 5}"#).unwrap();
        assert_eq!(parsed.user_ids, UserIds::One(5));
    }
}
