//! Request and response bodies exchanged with the backend services.

use serde::{Deserialize, Serialize};

/// Attempt number reported when all graded tries were used up. It closes the
/// quiz out with zero credit and is not a fourth real try.
pub const FINAL_ATTEMPT_REPORT: u8 = 4;

/// Body of a scoring report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub user_id: u64,

    /// 1 to 3 for a correct graded try, 4 for the close-out report
    pub attempt_number: u8,

    pub is_correct: bool,
}

/// What the scoring service answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResponse {
    #[serde(default)]
    pub points_awarded: Option<u32>,

    #[serde(default)]
    pub new_total_points: Option<u32>,

    /// Present and positive only for first-attempt correct answers
    #[serde(default)]
    pub kudos_awarded: Option<u32>,
}

/// Substitute material from the fallback resource service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackMaterial {
    #[serde(default)]
    pub resource_link: Option<String>,

    #[serde(default)]
    pub text_material: Option<String>,
}

/// Body shared by the quiz generation and fallback requests.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct StepContentRequest<'a> {
    pub step_content: &'a str,
}
