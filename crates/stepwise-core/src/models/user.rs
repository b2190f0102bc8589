//! User account model.

use serde::{Deserialize, Serialize};

/// A learner as known to the account service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,

    /// Experience points collected so far
    #[serde(default)]
    pub total_points: u32,

    /// Kudos balance, when the account service reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kudos: Option<u32>,
}
