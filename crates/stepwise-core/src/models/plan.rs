//! Plan model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Step;
use crate::parser;

/// A study plan as handed out by a plan store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Unique identifier for the plan
    pub id: u64,

    /// Title of the plan
    pub title: String,

    /// Raw markdown body, parsed into steps on selection
    pub content_md: String,

    /// Timestamp when the plan was stored locally (UTC). Plans fetched from
    /// the backend carry no timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl Plan {
    /// Parses the plan body into its ordered steps.
    pub fn steps(&self) -> Vec<Step> {
        parser::parse_steps(&self.content_md)
    }
}
