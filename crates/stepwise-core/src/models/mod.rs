//! Data models for study plans, steps, resources, and quizzes.
//!
//! This module contains the domain models the study companion works with.
//! Display implementations for these models live in
//! [`crate::display::models`] so that the data structures stay free of
//! presentation logic.
//!
//! # Ownership
//!
//! - [`Plan`]: owned by the plan store; the core never mutates plan content.
//! - [`Step`]: produced fresh by every parse of a plan body and addressed by
//!   index.
//! - [`ResolvedResource`]: transient, recomputed on every step selection.
//! - [`QuizData`]: owned by the active quiz session, discarded when a new
//!   quiz is generated or a new step is selected.
//!
//! # Examples
//!
//! ```rust
//! use stepwise_core::models::{QuizData, ResolvedResource, ResourceEmbed};
//!
//! let quiz = QuizData {
//!     question: "Which keyword declares a variable?".to_string(),
//!     options: vec!["let".to_string(), "fn".to_string()],
//!     answer_index: 0,
//!     hint: "It is three letters long".to_string(),
//! };
//! assert!(quiz.is_correct("let"));
//!
//! let resource = ResolvedResource::Url("https://youtu.be/abc123".to_string());
//! assert!(matches!(resource.embed(), ResourceEmbed::Video { .. }));
//! ```

pub mod plan;
pub mod quiz;
pub mod requests;
pub mod resource;
pub mod step;
pub mod summary;
pub mod user;

#[cfg(test)]
mod tests;

pub use plan::Plan;
pub use quiz::{QuizData, Reward};
pub use requests::{FallbackMaterial, ScoreRequest, ScoreResponse};
pub use resource::{ResolvedResource, ResourceEmbed};
pub use step::Step;
pub use summary::PlanSummary;
pub use user::User;
