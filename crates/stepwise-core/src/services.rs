//! Collaborator boundaries consumed by the core.
//!
//! Each trait is one request/response contract with an external service. The
//! core only depends on these traits; [`crate::client::ApiClient`] implements
//! all of them over HTTP and [`crate::store::LocalPlanStore`] implements
//! [`PlanStore`] on a local SQLite file. Tests substitute in-memory mocks.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::Result,
    models::{FallbackMaterial, Plan, QuizData, ScoreRequest, ScoreResponse, User},
    params::{CreatePlan, RegisterUser},
};

/// Supplies substitute learning material for a step whose link is missing or
/// broken.
#[async_trait]
pub trait FallbackResourceService: Send + Sync {
    async fn fallback_material(&self, step_content: &str) -> Result<FallbackMaterial>;
}

/// Produces a multiple-choice question from step text.
#[async_trait]
pub trait QuizGenerator: Send + Sync {
    async fn generate_quiz(&self, step_content: &str) -> Result<QuizData>;
}

/// Applies quiz attempt results to the grading ledger.
#[async_trait]
pub trait ScoringService: Send + Sync {
    async fn score_quiz(&self, request: &ScoreRequest) -> Result<ScoreResponse>;
}

/// Lists, fetches and deletes study plans.
#[async_trait]
pub trait PlanStore: Send + Sync {
    async fn list_plans(&self, user_id: u64) -> Result<Vec<Plan>>;

    /// Fails with [`crate::StudyError::PlanNotFound`] when the plan does not
    /// exist.
    async fn get_plan(&self, user_id: u64, plan_id: u64) -> Result<Plan>;

    async fn delete_plan(&self, plan_id: u64) -> Result<()>;
}

/// Generates new study plans on the backend.
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    async fn create_plan(&self, params: &CreatePlan) -> Result<Plan>;
}

/// Identity and balances of learners.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Registers a learner, or returns the existing account with that name.
    async fn register(&self, params: &RegisterUser) -> Result<User>;

    async fn get_user(&self, user_id: u64) -> Result<User>;
}

/// The collaborators a study session talks to while stepping through a plan.
#[derive(Clone)]
pub struct Services {
    pub fallback: Arc<dyn FallbackResourceService>,
    pub quizzes: Arc<dyn QuizGenerator>,
    pub scoring: Arc<dyn ScoringService>,
}

impl Services {
    pub fn new(
        fallback: Arc<dyn FallbackResourceService>,
        quizzes: Arc<dyn QuizGenerator>,
        scoring: Arc<dyn ScoringService>,
    ) -> Self {
        Self {
            fallback,
            quizzes,
            scoring,
        }
    }

    /// Uses one backend for every collaborator.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: FallbackResourceService + QuizGenerator + ScoringService + 'static,
    {
        Self {
            fallback: backend.clone(),
            quizzes: backend.clone(),
            scoring: backend,
        }
    }
}
