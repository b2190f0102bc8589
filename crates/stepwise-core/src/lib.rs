//! Core library for the Stepwise study companion.
//!
//! Stepwise turns a numbered-markdown study plan into a steppable lesson.
//! Each step gets a learning resource, with a fallback when the plan's own
//! link is missing or a placeholder. On demand it also gets a multiple-choice
//! quiz with three graded tries that awards experience points and kudos.
//!
//! # Architecture
//!
//! ```text
//! plan text ──▶ parser ──▶ steps ──select──▶ resolver ──▶ resource
//!                                       └───on demand──▶ quiz session ──▶ feedback
//! ```
//!
//! - [`parser`]: numbered markdown to ordered [`Step`]s
//! - [`resolver`]: link extraction, placeholder check and fallback lookup
//! - [`quiz`]: the bounded-retry quiz state machine and scoring reports
//! - [`controller`]: ties the three together for one learner and discards
//!   results of superseded selections
//! - [`services`]: the collaborator traits; [`client::ApiClient`] implements
//!   them over HTTP and [`store::LocalPlanStore`] keeps imported plans in
//!   SQLite
//! - [`display`]: markdown formatting for the CLI
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use stepwise_core::{ApiClient, ClientConfig, Services, StudyPlanController, services::PlanStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(ApiClient::new(ClientConfig::default()));
//! let plan = client.get_plan(1, 7).await?;
//!
//! let mut controller = StudyPlanController::new(Services::from_backend(client), 1);
//! controller.select_plan(plan);
//!
//! let resource = controller.open_step(0).await?;
//! println!("{resource}");
//!
//! let quiz = controller.start_quiz().await?;
//! let answer = quiz.options[0].clone();
//! let feedback = controller.submit_answer(&answer).await?;
//! println!("{feedback}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod controller;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod parser;
pub mod quiz;
pub mod resolver;
pub mod services;
pub mod store;

// Re-export commonly used types
pub use client::ApiClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use controller::{
    QuizTask, QuizUpdate, ResourceState, ResourceTask, ResourceUpdate, SelectionToken,
    StudyPlanController,
};
pub use db::Database;
pub use display::{LocalDateTime, OperationStatus, PlanSummaries, StepView, Steps};
pub use error::{Result, StudyError};
pub use models::{
    FallbackMaterial, Plan, PlanSummary, QuizData, ResolvedResource, ResourceEmbed, Reward,
    ScoreRequest, ScoreResponse, Step, User,
};
pub use params::{CreatePlan, Id, ImportPlan, RegisterUser, StepRef};
pub use parser::{parse_plan, parse_steps, ParsedPlan};
pub use quiz::{ActiveQuiz, AnswerFeedback, Attempt, Graded, Outcome, QuizSession};
pub use resolver::ResourceResolver;
pub use services::Services;
pub use store::{LocalPlanStore, StoreBuilder};
