//! Quiz content and reward types.

use serde::{Deserialize, Serialize};

use super::ScoreResponse;

/// A single multiple-choice question generated from a step's content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizData {
    pub question: String,

    /// Answer options in display order
    pub options: Vec<String>,

    /// Index of the correct option. Not validated: an out-of-range or
    /// negative index means no option can ever match.
    pub answer_index: i64,

    /// Shown after an incorrect, non-final answer
    pub hint: String,
}

impl QuizData {
    /// The text of the correct option, if the answer index points at one.
    pub fn correct_option(&self) -> Option<&str> {
        usize::try_from(self.answer_index)
            .ok()
            .and_then(|index| self.options.get(index))
            .map(String::as_str)
    }

    /// Whether the selected option text is the correct one.
    pub fn is_correct(&self, selected: &str) -> bool {
        self.correct_option() == Some(selected)
    }

    /// Resolves user input to an option text. The exact option text wins;
    /// otherwise the input is read as a 1-based option number.
    pub fn option_for_input(&self, input: &str) -> Option<&str> {
        let input = input.trim();
        self.options
            .iter()
            .find(|option| option.as_str() == input)
            .or_else(|| {
                input
                    .parse::<usize>()
                    .ok()
                    .and_then(|number| number.checked_sub(1))
                    .and_then(|index| self.options.get(index))
            })
            .map(String::as_str)
    }
}

/// Rewards reported by the scoring service for one quiz instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    /// Experience points awarded, when the service reported them
    pub points: Option<u32>,

    /// Kudos awarded; only ever set when greater than zero
    pub kudos: Option<u32>,

    /// The user's running XP total after this award, when reported
    pub total_points: Option<u32>,
}

impl Reward {
    pub fn is_empty(&self) -> bool {
        self.points.is_none() && self.kudos.is_none()
    }
}

impl From<&ScoreResponse> for Reward {
    fn from(response: &ScoreResponse) -> Self {
        Self {
            points: response.points_awarded,
            kudos: response.kudos_awarded.filter(|kudos| *kudos > 0),
            total_points: response.new_total_points,
        }
    }
}
