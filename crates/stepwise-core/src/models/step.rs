//! Step model definition.

use serde::{Deserialize, Serialize};

/// One numbered unit of a study plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Step {
    /// Title captured from the numbered line, trimmed
    pub title: String,

    /// Body lines following the numbered line, joined and trimmed
    pub content: String,
}

impl Step {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}
