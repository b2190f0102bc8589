#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use stepwise_core::{
    services::{FallbackResourceService, QuizGenerator, ScoringService},
    FallbackMaterial, LocalPlanStore, QuizData, Result, ScoreRequest, ScoreResponse,
    StoreBuilder, StudyError,
};
use tempfile::TempDir;
use tokio::sync::oneshot;

/// Helper function to create a store on a temporary database
pub async fn create_test_store() -> (TempDir, LocalPlanStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let store = StoreBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create store");
    (temp_dir, store)
}

pub fn sample_quiz() -> QuizData {
    QuizData {
        question: "What moves ownership?".to_string(),
        options: vec![
            "Assignment".to_string(),
            "Borrowing".to_string(),
            "Printing".to_string(),
        ],
        answer_index: 0,
        hint: "Think of `let b = a;`".to_string(),
    }
}

/// In-memory backend that records every call. Requests for a gated step body
/// wait until the gate's sender fires or is dropped.
pub struct MockBackend {
    fallback: Option<FallbackMaterial>,
    quiz: Option<QuizData>,
    score: Option<ScoreResponse>,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    pub fallback_calls: Mutex<Vec<String>>,
    pub quiz_calls: Mutex<Vec<String>>,
    pub score_calls: Mutex<Vec<ScoreRequest>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            fallback: Some(FallbackMaterial::default()),
            quiz: Some(sample_quiz()),
            score: Some(ScoreResponse {
                points_awarded: Some(3),
                new_total_points: Some(3),
                kudos_awarded: Some(1),
            }),
            gates: Mutex::new(HashMap::new()),
            fallback_calls: Mutex::new(Vec::new()),
            quiz_calls: Mutex::new(Vec::new()),
            score_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_fallback_link(mut self, url: &str) -> Self {
        self.fallback = Some(FallbackMaterial {
            resource_link: Some(url.to_string()),
            text_material: None,
        });
        self
    }

    pub fn without_quiz(mut self) -> Self {
        self.quiz = None;
        self
    }

    pub fn with_score(mut self, score: Option<ScoreResponse>) -> Self {
        self.score = score;
        self
    }

    /// Holds requests for `step_content` until the returned sender fires.
    pub fn gate(&self, step_content: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates
            .lock()
            .unwrap()
            .insert(step_content.to_string(), rx);
        tx
    }

    pub fn score_calls(&self) -> Vec<ScoreRequest> {
        self.score_calls.lock().unwrap().clone()
    }

    async fn wait_for_gate(&self, step_content: &str) {
        let gate = self.gates.lock().unwrap().remove(step_content);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
    }

    fn unavailable(path: &str) -> StudyError {
        StudyError::Server {
            status: 503,
            url: path.to_string(),
        }
    }
}

#[async_trait]
impl FallbackResourceService for MockBackend {
    async fn fallback_material(&self, step_content: &str) -> Result<FallbackMaterial> {
        self.fallback_calls
            .lock()
            .unwrap()
            .push(step_content.to_string());
        self.wait_for_gate(step_content).await;
        self.fallback
            .clone()
            .ok_or_else(|| Self::unavailable("/fallback_material"))
    }
}

#[async_trait]
impl QuizGenerator for MockBackend {
    async fn generate_quiz(&self, step_content: &str) -> Result<QuizData> {
        self.quiz_calls.lock().unwrap().push(step_content.to_string());
        self.wait_for_gate(step_content).await;
        self.quiz
            .clone()
            .ok_or_else(|| Self::unavailable("/generate_quiz"))
    }
}

#[async_trait]
impl ScoringService for MockBackend {
    async fn score_quiz(&self, request: &ScoreRequest) -> Result<ScoreResponse> {
        self.score_calls.lock().unwrap().push(*request);
        self.score.ok_or_else(|| Self::unavailable("/score_quiz"))
    }
}
