//! Local plan store backed by a SQLite file.
//!
//! Every operation opens the database on tokio's blocking pool, so the store
//! itself is only a path and is cheap to clone.

mod builder;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;
use tokio::task;

pub use builder::StoreBuilder;

use crate::{
    db::Database,
    error::{Result, StudyError},
    models::{Plan, PlanSummary},
    params::ImportPlan,
    services::PlanStore,
};

/// Plans imported from markdown files, kept on this machine.
#[derive(Debug, Clone)]
pub struct LocalPlanStore {
    db_path: PathBuf,
}

impl LocalPlanStore {
    fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    async fn with_db<T, F>(&self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            operation(&mut db)
        })
        .await
        .map_err(StudyError::join)?
    }

    /// Validates and stores a markdown plan.
    pub async fn import_plan(&self, params: &ImportPlan) -> Result<Plan> {
        params.validate()?;
        let title = params.title.trim().to_string();
        let content_md = params.content_md.clone();

        let plan = self
            .with_db(move |db| db.insert_plan(&title, &content_md))
            .await?;
        debug!("Imported plan {} ({})", plan.id, plan.title);
        Ok(plan)
    }

    /// Retrieves a plan, failing with `PlanNotFound` when it does not exist.
    pub async fn load_plan(&self, plan_id: u64) -> Result<Plan> {
        self.with_db(move |db| db.get_plan(plan_id))
            .await?
            .ok_or(StudyError::PlanNotFound { id: plan_id })
    }

    /// All stored plans, newest first.
    pub async fn all_plans(&self) -> Result<Vec<Plan>> {
        self.with_db(|db| db.list_plans()).await
    }

    /// Listing view of all stored plans.
    pub async fn plan_summaries(&self) -> Result<Vec<PlanSummary>> {
        let plans = self.all_plans().await?;
        Ok(plans.iter().map(PlanSummary::from).collect())
    }

    /// Deletes a plan, failing with `PlanNotFound` when it does not exist.
    pub async fn remove_plan(&self, plan_id: u64) -> Result<()> {
        let deleted = self.with_db(move |db| db.delete_plan(plan_id)).await?;
        if !deleted {
            return Err(StudyError::PlanNotFound { id: plan_id });
        }
        debug!("Deleted plan {plan_id}");
        Ok(())
    }
}

/// Local plans belong to whoever uses this machine; the user id is ignored.
#[async_trait]
impl PlanStore for LocalPlanStore {
    async fn list_plans(&self, _user_id: u64) -> Result<Vec<Plan>> {
        self.all_plans().await
    }

    async fn get_plan(&self, _user_id: u64, plan_id: u64) -> Result<Plan> {
        self.load_plan(plan_id).await
    }

    async fn delete_plan(&self, plan_id: u64) -> Result<()> {
        self.remove_plan(plan_id).await
    }
}
