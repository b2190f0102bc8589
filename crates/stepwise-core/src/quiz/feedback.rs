use serde::{Deserialize, Serialize};

use crate::models::Reward;

/// How a submitted answer was graded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Correct,
    Retry,
    Exhausted,
}

/// What the learner is told after submitting an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerFeedback {
    pub outcome: Outcome,

    /// For `Correct`, the attempt that succeeded; for `Retry`, the attempt
    /// the next answer will be graded at; for `Exhausted`, the last graded
    /// attempt.
    pub attempt: u8,

    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward: Option<Reward>,

    /// Revealed once all attempts are used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_option: Option<String>,
}

impl AnswerFeedback {
    pub(crate) fn correct(attempt: u8, reward: Option<Reward>) -> Self {
        let mut message = "Great job! That's the correct answer.".to_string();
        append_reward(&mut message, reward);

        Self {
            outcome: Outcome::Correct,
            attempt,
            message,
            reward,
            correct_option: None,
        }
    }

    pub(crate) fn retry(next_attempt: u8, hint: &str) -> Self {
        Self {
            outcome: Outcome::Retry,
            attempt: next_attempt,
            message: format!("That's not quite right. Hint: {hint}"),
            reward: None,
            correct_option: None,
        }
    }

    pub(crate) fn exhausted(correct_option: Option<String>, reward: Option<Reward>) -> Self {
        let mut message = match &correct_option {
            Some(option) => format!("Incorrect. The correct answer is: {option}"),
            None => "Incorrect. No correct answer is available for this quiz.".to_string(),
        };
        append_reward(&mut message, reward);

        Self {
            outcome: Outcome::Exhausted,
            attempt: super::MAX_GRADED_ATTEMPTS,
            message,
            reward,
            correct_option,
        }
    }

    pub fn is_final(&self) -> bool {
        self.outcome != Outcome::Retry
    }
}

fn append_reward(message: &mut String, reward: Option<Reward>) {
    let Some(reward) = reward else {
        return;
    };
    if let Some(points) = reward.points {
        message.push_str(&format!(" You earned {points} XP!"));
    }
    if let Some(kudos) = reward.kudos {
        message.push_str(&format!(
            " +{kudos} Kudos for answering correctly on your first try!"
        ));
    }
}
