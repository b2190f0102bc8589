//! Quiz attempt state machine.
//!
//! A quiz instance moves through these states:
//!
//! ```text
//!            generate           response            correct answer
//! NoQuiz ───────────▶ Generating ───────▶ Active(1) ────────────────▶ Correct
//!   ▲                     │                 │  wrong, n < 3              ▲
//!   └──── transport error ┘                 ▼                            │
//!                                        Active(n+1) ─── correct ────────┘
//!                                           │
//!                                           └── wrong at n == 3 ───▶ Exhausted
//! ```
//!
//! Only an [`ActiveQuiz`] can be graded, and grading consumes it, so an answer
//! for a quiz that is not accepting answers cannot be expressed at that level.
//! [`QuizSession`] wraps the states for owners that hold a session across
//! user interactions and reports [`StudyError::NoActiveQuiz`] instead.
//!
//! The scoring service is contacted exactly once per quiz instance: on the
//! first correct answer, or with the close-out attempt number
//! [`FINAL_ATTEMPT_REPORT`] after the third wrong answer. The local transition
//! is made before the report is sent and stands even when reporting fails.

pub mod feedback;


use log::{debug, warn};

pub use feedback::{AnswerFeedback, Outcome};

use crate::{
    error::{Result, StudyError},
    models::{requests::FINAL_ATTEMPT_REPORT, QuizData, Reward, ScoreRequest},
    services::{QuizGenerator, ScoringService},
};

/// Number of graded tries a learner gets per quiz instance.
pub const MAX_GRADED_ATTEMPTS: u8 = 3;

/// 1-based number of a graded try, always within `1..=MAX_GRADED_ATTEMPTS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Attempt(u8);

impl Attempt {
    pub const FIRST: Attempt = Attempt(1);

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn is_last(self) -> bool {
        self.0 >= MAX_GRADED_ATTEMPTS
    }

    fn next(self) -> Option<Attempt> {
        (!self.is_last()).then_some(Attempt(self.0 + 1))
    }
}

/// A generated quiz that is accepting answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveQuiz {
    quiz: QuizData,
    attempt: Attempt,
}

/// Result of grading one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Graded {
    /// The answer matched the correct option
    Correct { quiz: QuizData, attempt: Attempt },
    /// Wrong answer with tries left; the quiz continues at the next attempt
    Retry(ActiveQuiz),
    /// Wrong answer on the last graded try
    Exhausted { quiz: QuizData },
}

impl ActiveQuiz {
    /// Starts a freshly generated quiz at the first attempt.
    pub fn new(quiz: QuizData) -> Self {
        Self {
            quiz,
            attempt: Attempt::FIRST,
        }
    }

    pub fn quiz(&self) -> &QuizData {
        &self.quiz
    }

    pub fn attempt(&self) -> Attempt {
        self.attempt
    }

    /// Grades the selected option text, consuming this attempt.
    pub fn grade(self, selected: &str) -> Graded {
        if self.quiz.is_correct(selected) {
            return Graded::Correct {
                quiz: self.quiz,
                attempt: self.attempt,
            };
        }

        match self.attempt.next() {
            Some(attempt) => Graded::Retry(ActiveQuiz {
                quiz: self.quiz,
                attempt,
            }),
            None => Graded::Exhausted { quiz: self.quiz },
        }
    }
}

impl Graded {
    /// The scoring report this grading decision requires, if any.
    pub fn score_request(&self, user_id: u64) -> Option<ScoreRequest> {
        match self {
            Graded::Correct { attempt, .. } => Some(ScoreRequest {
                user_id,
                attempt_number: attempt.number(),
                is_correct: true,
            }),
            Graded::Retry(_) => None,
            Graded::Exhausted { .. } => Some(ScoreRequest {
                user_id,
                attempt_number: FINAL_ATTEMPT_REPORT,
                is_correct: false,
            }),
        }
    }
}

/// The quiz state of the currently selected step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QuizSession {
    #[default]
    NoQuiz,
    Generating,
    Active(ActiveQuiz),
    Correct {
        quiz: QuizData,
        attempt: Attempt,
        reward: Option<Reward>,
    },
    Exhausted {
        quiz: QuizData,
        reward: Option<Reward>,
    },
}

impl QuizSession {
    /// The quiz being shown, in any state that has one.
    pub fn quiz(&self) -> Option<&QuizData> {
        match self {
            QuizSession::NoQuiz | QuizSession::Generating => None,
            QuizSession::Active(active) => Some(active.quiz()),
            QuizSession::Correct { quiz, .. } | QuizSession::Exhausted { quiz, .. } => Some(quiz),
        }
    }

    /// The attempt number answers are currently graded at.
    pub fn attempt(&self) -> Option<u8> {
        match self {
            QuizSession::Active(active) => Some(active.attempt().number()),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            QuizSession::Correct { .. } | QuizSession::Exhausted { .. }
        )
    }

    /// Moves to `Generating`. Allowed from `NoQuiz` and from either terminal
    /// state, which discards the finished quiz.
    pub fn begin_generation(&mut self) -> Result<()> {
        match self {
            QuizSession::Generating | QuizSession::Active(_) => Err(StudyError::QuizInProgress),
            _ => {
                *self = QuizSession::Generating;
                Ok(())
            }
        }
    }

    /// Abandons a pending generation, moving back to `NoQuiz`. Returns
    /// `false` when no generation was pending.
    pub fn cancel_generation(&mut self) -> bool {
        if !matches!(self, QuizSession::Generating) {
            return false;
        }
        *self = QuizSession::NoQuiz;
        true
    }

    /// Applies the quiz generation response.
    ///
    /// On success the quiz becomes active at attempt 1. A generation error is
    /// returned after moving back to `NoQuiz`, so generation can be retried.
    /// Returns `Ok(false)` without a transition when no generation was
    /// pending.
    pub fn finish_generation(&mut self, result: Result<QuizData>) -> Result<bool> {
        if !matches!(self, QuizSession::Generating) {
            warn!("Ignoring quiz generation result: no generation pending");
            return Ok(false);
        }

        match result {
            Ok(quiz) => {
                debug!("Quiz ready with {} options", quiz.options.len());
                *self = QuizSession::Active(ActiveQuiz::new(quiz));
                Ok(true)
            }
            Err(e) => {
                *self = QuizSession::NoQuiz;
                Err(e)
            }
        }
    }

    /// Generates a quiz for the given step body and makes it active.
    pub async fn generate(
        &mut self,
        generator: &dyn QuizGenerator,
        step_content: &str,
    ) -> Result<&QuizData> {
        self.begin_generation()?;
        let result = generator.generate_quiz(step_content).await;
        self.finish_generation(result)?;
        self.quiz().ok_or(StudyError::NoActiveQuiz)
    }

    /// Grades an answer and reports to the scoring service when the grading
    /// decision calls for it.
    pub async fn submit_answer(
        &mut self,
        selected: &str,
        scoring: &dyn ScoringService,
        user_id: u64,
    ) -> Result<AnswerFeedback> {
        let active = match std::mem::take(self) {
            QuizSession::Active(active) => active,
            other => {
                *self = other;
                return Err(StudyError::NoActiveQuiz);
            }
        };

        let graded = active.grade(selected);
        let request = graded.score_request(user_id);

        match graded {
            Graded::Retry(next) => {
                debug!("Wrong answer, moving to attempt {}", next.attempt().number());
                let feedback = AnswerFeedback::retry(next.attempt().number(), &next.quiz().hint);
                *self = QuizSession::Active(next);
                Ok(feedback)
            }
            Graded::Correct { quiz, attempt } => {
                debug!("Correct answer at attempt {}", attempt.number());
                *self = QuizSession::Correct {
                    quiz,
                    attempt,
                    reward: None,
                };
                let reward = report(scoring, request).await;
                if let QuizSession::Correct { reward: slot, .. } = self {
                    *slot = reward;
                }
                Ok(AnswerFeedback::correct(attempt.number(), reward))
            }
            Graded::Exhausted { quiz } => {
                debug!("All {MAX_GRADED_ATTEMPTS} attempts used");
                let correct_option = quiz.correct_option().map(String::from);
                *self = QuizSession::Exhausted { quiz, reward: None };
                let reward = report(scoring, request).await;
                if let QuizSession::Exhausted { reward: slot, .. } = self {
                    *slot = reward;
                }
                Ok(AnswerFeedback::exhausted(correct_option, reward))
            }
        }
    }
}

async fn report(scoring: &dyn ScoringService, request: Option<ScoreRequest>) -> Option<Reward> {
    let request = request?;
    match scoring.score_quiz(&request).await {
        Ok(response) => Some(Reward::from(&response)),
        Err(e) => {
            warn!(
                "Failed to report attempt {} for user {}: {e}",
                request.attempt_number, request.user_id
            );
            None
        }
    }
}
