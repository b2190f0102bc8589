//! Parameter structures for study operations
//!
//! Shared parameter structures used across interfaces (the CLI today, any
//! other presentation layer later) without framework-specific derives. The
//! CLI defines its own clap wrappers and converts them into these types:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │  Services /     │
//! │  (clap derives) │───▶│ (serde derives) │───▶│  Local store    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Parameter types that travel to the backend serialize to exactly the JSON
//! body the corresponding endpoint expects.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StudyError};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for asking the backend to generate a new study plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePlan {
    /// Owner of the new plan
    pub user_id: u64,
    /// School grade the plan is pitched at
    pub grade: u32,
    /// Subject to study, e.g. "fractions"
    pub subject: String,
    /// What the learner wants to achieve
    pub goal: String,
}

/// Parameters for storing a markdown plan in the local store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportPlan {
    pub title: String,
    pub content_md: String,
}

impl ImportPlan {
    /// Validates the plan before it is written.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(StudyError::invalid_input("title").with_reason("must not be empty"));
        }
        if self.content_md.trim().is_empty() {
            return Err(StudyError::invalid_input("content_md").with_reason("must not be empty"));
        }
        Ok(())
    }
}

/// Parameters for registering a learner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterUser {
    pub name: String,
    pub email: String,
}

/// Addresses one step of one plan. `number` is 1-based, as shown to users.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StepRef {
    pub plan_id: u64,
    pub number: usize,
}

impl StepRef {
    /// The 0-based step index.
    pub fn index(&self) -> Result<usize> {
        self.number
            .checked_sub(1)
            .ok_or_else(|| StudyError::invalid_input("step").with_reason("step numbers start at 1"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_plan_validation() {
        let valid = ImportPlan {
            title: "Rust basics".to_string(),
            content_md: "1. Variables".to_string(),
        };
        assert!(valid.validate().is_ok());

        let blank_title = ImportPlan {
            title: "  ".to_string(),
            content_md: "1. Variables".to_string(),
        };
        assert!(matches!(
            blank_title.validate(),
            Err(StudyError::InvalidInput { field, .. }) if field == "title"
        ));
    }

    #[test]
    fn test_step_ref_index() {
        assert_eq!(StepRef { plan_id: 1, number: 3 }.index().unwrap(), 2);
        assert!(StepRef { plan_id: 1, number: 0 }.index().is_err());
    }

    #[test]
    fn test_create_plan_serializes_backend_body() {
        let params = CreatePlan {
            user_id: 7,
            grade: 5,
            subject: "fractions".to_string(),
            goal: "add unlike fractions".to_string(),
        };
        let body = serde_json::to_value(&params).unwrap();
        assert_eq!(body["user_id"], 7);
        assert_eq!(body["grade"], 5);
        assert_eq!(body["subject"], "fractions");
    }
}
