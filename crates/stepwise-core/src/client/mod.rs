//! HTTP client for the study backend.
//!
//! [`ApiClient`] implements every collaborator trait in [`crate::services`]
//! over the backend's JSON API. Requests are made with a blocking `ureq`
//! agent on tokio's blocking pool, the same way the local store runs its
//! SQLite calls.
//!
//! Status handling:
//!
//! - 404 on a plan or user lookup becomes `PlanNotFound` / `UserNotFound`
//! - any other non-success status becomes `StudyError::Server`
//! - connection failures and timeouts become `StudyError::Transport`

mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use tokio::task;

use self::routes::Route;
use crate::{
    config::ClientConfig,
    error::{Result, StudyError},
    models::{FallbackMaterial, Plan, QuizData, ScoreRequest, ScoreResponse, User},
    params::{CreatePlan, RegisterUser},
    services::{
        AccountService, FallbackResourceService, PlanGenerator, PlanStore, QuizGenerator,
        ScoringService,
    },
};

/// Client for the study backend API.
#[derive(Clone)]
pub struct ApiClient {
    agent: ureq::Agent,
    config: Arc<ClientConfig>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build();
        Self {
            agent,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn json<T>(&self, route: Route) -> Result<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.dispatch(route, |response| {
            Ok(serde_json::from_reader(response.into_reader())?)
        })
        .await
    }

    async fn discard(&self, route: Route) -> Result<()> {
        self.dispatch(route, |_| Ok(())).await
    }

    async fn dispatch<T, P>(&self, route: Route, parse: P) -> Result<T>
    where
        T: Send + 'static,
        P: FnOnce(ureq::Response) -> Result<T> + Send + 'static,
    {
        let agent = self.agent.clone();
        let url = self.config.endpoint(&route.path);
        debug!("{} {url}", route.method);

        task::spawn_blocking(move || {
            let request = agent.request(route.method.as_str(), &url);
            let response = match route.body {
                Some(body) => request.send_json(body),
                None => request.call(),
            }
            .map_err(|e| StudyError::from_http(&url, e))?;
            parse(response)
        })
        .await
        .map_err(StudyError::join)?
    }
}

fn plan_not_found(plan_id: u64) -> impl FnOnce(StudyError) -> StudyError {
    move |e| match e {
        StudyError::Server { status: 404, .. } => StudyError::PlanNotFound { id: plan_id },
        other => other,
    }
}

#[async_trait]
impl FallbackResourceService for ApiClient {
    async fn fallback_material(&self, step_content: &str) -> Result<FallbackMaterial> {
        self.json(Route::fallback_material(step_content)?).await
    }
}

#[async_trait]
impl QuizGenerator for ApiClient {
    async fn generate_quiz(&self, step_content: &str) -> Result<QuizData> {
        self.json(Route::generate_quiz(step_content)?).await
    }
}

#[async_trait]
impl ScoringService for ApiClient {
    async fn score_quiz(&self, request: &ScoreRequest) -> Result<ScoreResponse> {
        self.json(Route::score_quiz(request)?).await
    }
}

#[async_trait]
impl PlanStore for ApiClient {
    async fn list_plans(&self, user_id: u64) -> Result<Vec<Plan>> {
        self.json(Route::list_plans(user_id)).await
    }

    async fn get_plan(&self, user_id: u64, plan_id: u64) -> Result<Plan> {
        self.json(Route::plan(user_id, plan_id))
            .await
            .map_err(plan_not_found(plan_id))
    }

    async fn delete_plan(&self, plan_id: u64) -> Result<()> {
        self.discard(Route::delete_plan(plan_id))
            .await
            .map_err(plan_not_found(plan_id))
    }
}

#[async_trait]
impl PlanGenerator for ApiClient {
    async fn create_plan(&self, params: &CreatePlan) -> Result<Plan> {
        self.json(Route::create_plan(params)?).await
    }
}

#[async_trait]
impl AccountService for ApiClient {
    async fn register(&self, params: &RegisterUser) -> Result<User> {
        self.json(Route::register(params)?).await
    }

    async fn get_user(&self, user_id: u64) -> Result<User> {
        self.json(Route::user(user_id)).await.map_err(|e| match e {
            StudyError::Server { status: 404, .. } => StudyError::UserNotFound { id: user_id },
            other => other,
        })
    }
}
