//! Plan summary types used for listings.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Plan;

/// Summary information about a plan with its step count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Plan ID
    pub id: u64,
    /// Title of the plan
    pub title: String,
    /// Number of steps the plan body parses into
    pub total_steps: usize,
    /// Creation timestamp, for locally stored plans
    pub created_at: Option<Timestamp>,
}

impl From<&Plan> for PlanSummary {
    fn from(plan: &Plan) -> Self {
        Self {
            id: plan.id,
            title: plan.title.clone(),
            total_steps: plan.steps().len(),
            created_at: plan.created_at,
        }
    }
}
