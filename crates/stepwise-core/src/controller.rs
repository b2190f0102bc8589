//! Interactive study session over one plan.
//!
//! [`StudyPlanController`] owns the selected plan, its parsed steps, the
//! selected step, the resolved resource and the quiz session. Slow work runs
//! in tasks that do not borrow the controller:
//!
//! ```text
//! select_step(i) ──▶ ResourceTask ──run()──▶ ResourceUpdate ──▶ apply_resource()
//! generate_quiz() ─▶ QuizTask ─────run()──▶ QuizUpdate ──────▶ apply_quiz()
//! ```
//!
//! Every task carries the [`SelectionToken`] current when it was created.
//! Selecting a plan or a step advances the token, and an update whose token
//! is no longer current is dropped, so a slow resolution for an earlier step
//! can never overwrite the resource of the step now shown.
//!
//! Quiz generation does not advance the token, so a resource still loading
//! for the same step stays valid. Each quiz task is numbered instead, and
//! only the latest request for the current selection is applied. A quiz
//! task that is dropped unapplied leaves the session `Generating` until
//! [`StudyPlanController::cancel_quiz`] or a new selection clears it.

use std::sync::Arc;

use log::{debug, warn};

use crate::{
    error::{Result, StudyError},
    models::{Plan, QuizData, ResolvedResource, Step},
    parser::{self, ParsedPlan},
    quiz::{AnswerFeedback, QuizSession},
    resolver::ResourceResolver,
    services::{QuizGenerator, Services},
};

/// Identifies one selection of a plan or step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionToken(u64);

/// Where the resource of the selected step is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResourceState {
    #[default]
    Idle,
    Loading,
    Ready(ResolvedResource),
}

impl ResourceState {
    pub fn resource(&self) -> Option<&ResolvedResource> {
        match self {
            ResourceState::Ready(resource) => Some(resource),
            _ => None,
        }
    }
}

/// Pending resource resolution for a selected step.
pub struct ResourceTask {
    token: SelectionToken,
    step_content: String,
    resolver: ResourceResolver,
}

/// Outcome of a [`ResourceTask`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceUpdate {
    pub token: SelectionToken,
    pub resource: ResolvedResource,
}

impl ResourceTask {
    pub fn token(&self) -> SelectionToken {
        self.token
    }

    pub async fn run(self) -> ResourceUpdate {
        let resource = self.resolver.resolve(&self.step_content).await;
        ResourceUpdate {
            token: self.token,
            resource,
        }
    }
}

/// Pending quiz generation for the selected step.
pub struct QuizTask {
    token: SelectionToken,
    request: u64,
    step_content: String,
    generator: Arc<dyn QuizGenerator>,
}

/// Outcome of a [`QuizTask`].
#[derive(Debug)]
pub struct QuizUpdate {
    pub token: SelectionToken,
    /// Sequence number of the quiz request
    pub request: u64,
    pub result: Result<QuizData>,
}

impl QuizTask {
    pub fn token(&self) -> SelectionToken {
        self.token
    }

    pub async fn run(self) -> QuizUpdate {
        let result = self.generator.generate_quiz(&self.step_content).await;
        QuizUpdate {
            token: self.token,
            request: self.request,
            result,
        }
    }
}

/// Drives one learner through a study plan.
pub struct StudyPlanController {
    services: Services,
    resolver: ResourceResolver,
    user_id: u64,
    generation: u64,
    quiz_requests: u64,
    plan: Option<Plan>,
    parsed: ParsedPlan,
    selected: Option<usize>,
    resource: ResourceState,
    quiz: QuizSession,
}

impl StudyPlanController {
    /// Creates a controller acting for the given user.
    pub fn new(services: Services, user_id: u64) -> Self {
        let resolver = ResourceResolver::new(services.fallback.clone());
        Self {
            services,
            resolver,
            user_id,
            generation: 0,
            quiz_requests: 0,
            plan: None,
            parsed: ParsedPlan::default(),
            selected: None,
            resource: ResourceState::Idle,
            quiz: QuizSession::NoQuiz,
        }
    }

    /// Makes `plan` the current plan and parses its steps. Any step
    /// selection, resource and quiz of the previous plan are discarded.
    pub fn select_plan(&mut self, plan: Plan) {
        debug!("Selecting plan {} ({})", plan.id, plan.title);
        self.advance();
        self.parsed = parser::parse_plan(&plan.content_md);
        self.plan = Some(plan);
        self.selected = None;
        self.resource = ResourceState::Idle;
        self.quiz = QuizSession::NoQuiz;
    }

    /// Selects the step at the 0-based `index` and returns the task that
    /// resolves its resource.
    pub fn select_step(&mut self, index: usize) -> Result<ResourceTask> {
        if self.plan.is_none() {
            return Err(StudyError::NoPlanSelected);
        }
        let step = self
            .parsed
            .steps
            .get(index)
            .ok_or(StudyError::StepOutOfRange {
                index,
                len: self.parsed.steps.len(),
            })?;
        let step_content = step.content.clone();

        let token = self.advance();
        debug!("Selecting step {index} with token {token:?}");
        self.selected = Some(index);
        self.resource = ResourceState::Loading;
        self.quiz = QuizSession::NoQuiz;

        Ok(ResourceTask {
            token,
            step_content,
            resolver: self.resolver.clone(),
        })
    }

    /// Applies a resolved resource. Returns `false` when the update belongs
    /// to a selection that has since been replaced.
    pub fn apply_resource(&mut self, update: ResourceUpdate) -> bool {
        if !self.is_current(update.token) {
            warn!(
                "Discarding stale resource update (token {:?}, current {:?})",
                update.token,
                self.token()
            );
            return false;
        }
        self.resource = ResourceState::Ready(update.resource);
        true
    }

    /// Selects a step and waits for its resource.
    pub async fn open_step(&mut self, index: usize) -> Result<&ResolvedResource> {
        let task = self.select_step(index)?;
        let update = task.run().await;
        self.apply_resource(update);
        self.resource
            .resource()
            .ok_or(StudyError::NoStepSelected)
    }

    /// Starts quiz generation for the selected step. The selection token is
    /// left as is; the task is numbered so that only this request applies.
    pub fn generate_quiz(&mut self) -> Result<QuizTask> {
        let step = self.selected_step().ok_or(StudyError::NoStepSelected)?;
        let step_content = step.content.clone();

        self.quiz.begin_generation()?;
        self.quiz_requests += 1;
        Ok(QuizTask {
            token: self.token(),
            request: self.quiz_requests,
            step_content,
            generator: self.services.quizzes.clone(),
        })
    }

    /// Applies a generated quiz. Returns `Ok(false)` for a stale update; a
    /// generation error is returned with the session back at `NoQuiz`.
    pub fn apply_quiz(&mut self, update: QuizUpdate) -> Result<bool> {
        if !self.is_current(update.token) {
            warn!(
                "Discarding stale quiz for token {:?}, current {:?}",
                update.token,
                self.token()
            );
            return Ok(false);
        }
        if update.request != self.quiz_requests {
            warn!(
                "Discarding superseded quiz request {} (latest {})",
                update.request, self.quiz_requests
            );
            return Ok(false);
        }
        self.quiz.finish_generation(update.result)
    }

    /// Abandons a pending quiz generation so a new one can be started.
    /// Returns `false` when no generation was pending.
    pub fn cancel_quiz(&mut self) -> bool {
        let cancelled = self.quiz.cancel_generation();
        if cancelled {
            debug!("Cancelled quiz request {}", self.quiz_requests);
        }
        cancelled
    }

    /// Generates a quiz for the selected step and waits for it.
    pub async fn start_quiz(&mut self) -> Result<&QuizData> {
        let task = self.generate_quiz()?;
        let update = task.run().await;
        self.apply_quiz(update)?;
        self.quiz.quiz().ok_or(StudyError::NoActiveQuiz)
    }

    /// Grades an answer for the active quiz.
    pub async fn submit_answer(&mut self, selected: &str) -> Result<AnswerFeedback> {
        self.quiz
            .submit_answer(selected, self.services.scoring.as_ref(), self.user_id)
            .await
    }

    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    pub fn steps(&self) -> &[Step] {
        &self.parsed.steps
    }

    pub fn preamble(&self) -> Option<&str> {
        self.parsed.preamble.as_deref()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_step(&self) -> Option<&Step> {
        self.selected.and_then(|index| self.parsed.steps.get(index))
    }

    pub fn resource(&self) -> &ResourceState {
        &self.resource
    }

    pub fn quiz(&self) -> &QuizSession {
        &self.quiz
    }

    /// The token of the current selection.
    pub fn token(&self) -> SelectionToken {
        SelectionToken(self.generation)
    }

    fn is_current(&self, token: SelectionToken) -> bool {
        token == self.token()
    }

    fn advance(&mut self) -> SelectionToken {
        self.generation += 1;
        self.token()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::{
        models::{FallbackMaterial, ScoreRequest, ScoreResponse},
        services::{FallbackResourceService, ScoringService},
    };

    struct Offline;

    #[async_trait]
    impl FallbackResourceService for Offline {
        async fn fallback_material(&self, _step_content: &str) -> Result<FallbackMaterial> {
            Ok(FallbackMaterial::default())
        }
    }

    #[async_trait]
    impl QuizGenerator for Offline {
        async fn generate_quiz(&self, _step_content: &str) -> Result<QuizData> {
            Ok(QuizData {
                question: "q".to_string(),
                options: vec!["a".to_string(), "b".to_string()],
                answer_index: 1,
                hint: "not a".to_string(),
            })
        }
    }

    #[async_trait]
    impl ScoringService for Offline {
        async fn score_quiz(&self, _request: &ScoreRequest) -> Result<ScoreResponse> {
            Ok(ScoreResponse::default())
        }
    }

    fn controller() -> StudyPlanController {
        StudyPlanController::new(Services::from_backend(Arc::new(Offline)), 1)
    }

    fn plan() -> Plan {
        Plan {
            id: 3,
            title: "Ownership".to_string(),
            content_md: "Intro\n1. Moves\nbody one\n2. Borrows\nbody two".to_string(),
            created_at: None,
        }
    }

    #[test]
    fn test_select_step_requires_plan() {
        let mut controller = controller();
        assert!(matches!(
            controller.select_step(0),
            Err(StudyError::NoPlanSelected)
        ));
    }

    #[test]
    fn test_select_step_out_of_range() {
        let mut controller = controller();
        controller.select_plan(plan());

        let result = controller.select_step(2);

        assert!(matches!(
            result,
            Err(StudyError::StepOutOfRange { index: 2, len: 2 })
        ));
        assert_eq!(controller.resource(), &ResourceState::Idle);
    }

    #[test]
    fn test_select_plan_parses_steps_and_preamble() {
        let mut controller = controller();
        controller.select_plan(plan());

        assert_eq!(controller.steps().len(), 2);
        assert_eq!(controller.preamble(), Some("Intro"));
        assert!(controller.selected_step().is_none());
    }

    #[test]
    fn test_select_step_advances_token_and_marks_loading() {
        let mut controller = controller();
        controller.select_plan(plan());
        let before = controller.token();

        let task = controller.select_step(1).unwrap();

        assert_ne!(task.token(), before);
        assert_eq!(task.token(), controller.token());
        assert_eq!(controller.resource(), &ResourceState::Loading);
        assert_eq!(controller.selected_step().map(|s| s.title.as_str()), Some("Borrows"));
    }

    #[test]
    fn test_generate_quiz_requires_step() {
        let mut controller = controller();
        controller.select_plan(plan());
        assert!(matches!(
            controller.generate_quiz(),
            Err(StudyError::NoStepSelected)
        ));
    }

    #[tokio::test]
    async fn test_generate_quiz_keeps_selection_token() {
        let mut controller = controller();
        controller.select_plan(plan());
        let resource_task = controller.select_step(0).unwrap();

        let quiz_task = controller.generate_quiz().unwrap();

        assert_eq!(quiz_task.token(), resource_task.token());
        assert!(controller.apply_resource(resource_task.run().await));
    }

    #[tokio::test]
    async fn test_cancelled_quiz_request_is_superseded() {
        let mut controller = controller();
        controller.select_plan(plan());
        controller.open_step(0).await.unwrap();

        let abandoned = controller.generate_quiz().unwrap();
        assert!(controller.cancel_quiz());
        assert_eq!(controller.quiz(), &QuizSession::NoQuiz);

        let retried = controller.generate_quiz().unwrap();
        let late = abandoned.run().await;
        assert!(!controller.apply_quiz(late).unwrap());
        assert_eq!(controller.quiz(), &QuizSession::Generating);

        assert!(controller.apply_quiz(retried.run().await).unwrap());
        assert_eq!(controller.quiz().attempt(), Some(1));
    }

    #[test]
    fn test_cancel_quiz_without_pending_generation() {
        let mut controller = controller();
        controller.select_plan(plan());
        assert!(!controller.cancel_quiz());
    }

    #[tokio::test]
    async fn test_open_step_and_answer() {
        let mut controller = controller();
        controller.select_plan(plan());

        let resource = controller.open_step(0).await.unwrap();
        assert_eq!(resource, &ResolvedResource::None);

        controller.start_quiz().await.unwrap();
        let feedback = controller.submit_answer("b").await.unwrap();
        assert!(feedback.is_final());
        assert!(controller.quiz().is_terminal());
    }
}
