//! Command handlers.
//!
//! Each handler runs one core operation and renders its markdown through the
//! [`TerminalRenderer`]. Plans come from the local store unless `--remote`
//! was given; quiz generation, scoring, fallback resources, plan generation
//! and accounts always go to the backend.

use std::{io, path::Path, sync::Arc};

use anyhow::{anyhow, bail, Context, Result};
use log::debug;
use stepwise_core::{
    params::{Id, ImportPlan, RegisterUser, StepRef},
    services::{AccountService, PlanGenerator, PlanStore},
    ApiClient, LocalPlanStore, OperationStatus, Plan, PlanSummaries, PlanSummary,
    ResourceResolver, Services, StepView, Steps, StudyError, StudyPlanController,
};

use crate::{
    args::{CreatePlanArgs, ImportPlanArgs, PlanCommands, StepCommands, UserCommands},
    renderer::TerminalRenderer,
};

/// Where plans are read from and deleted.
pub enum PlanSource {
    Local(LocalPlanStore),
    Remote,
}

pub struct Cli {
    source: PlanSource,
    client: Arc<ApiClient>,
    user_id: Option<u64>,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(
        source: PlanSource,
        client: ApiClient,
        user_id: Option<u64>,
        renderer: TerminalRenderer,
    ) -> Self {
        Self {
            source,
            client: Arc::new(client),
            user_id,
            renderer,
        }
    }

    fn plans(&self) -> &dyn PlanStore {
        match &self.source {
            PlanSource::Local(store) => store,
            PlanSource::Remote => self.client.as_ref(),
        }
    }

    fn require_user(&self) -> Result<u64> {
        self.user_id
            .ok_or_else(|| anyhow!("This command needs a learner: pass --user-id or set STEPWISE_USER_ID"))
    }

    /// The user id plans are listed for. Local plans ignore it.
    fn plan_owner(&self) -> Result<u64> {
        match self.source {
            PlanSource::Local(_) => Ok(self.user_id.unwrap_or_default()),
            PlanSource::Remote => self.require_user(),
        }
    }

    async fn load_plan(&self, plan_id: u64) -> Result<Plan> {
        let owner = self.plan_owner()?;
        self.plans()
            .get_plan(owner, plan_id)
            .await
            .with_context(|| format!("Failed to load plan {plan_id}"))
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::List => self.list_plans().await,
            PlanCommands::Show(args) => self.show_plan(&args.into()).await,
            PlanCommands::Import(args) => self.import_plan(args).await,
            PlanCommands::Delete(args) => self.delete_plan(&args.into()).await,
            PlanCommands::Create(args) => self.create_plan(args).await,
        }
    }

    pub async fn handle_step_command(&self, command: StepCommands) -> Result<()> {
        match command {
            StepCommands::List(args) => self.list_steps(&args.into()).await,
            StepCommands::Show(args) => self.show_step(&args.into()).await,
        }
    }

    pub async fn handle_user_command(&self, command: UserCommands) -> Result<()> {
        match command {
            UserCommands::Register(args) => self.register_user(&args.into()).await,
            UserCommands::Show(args) => self.show_user(args.id).await,
        }
    }

    pub async fn list_plans(&self) -> Result<()> {
        let owner = self.plan_owner()?;
        let plans = self
            .plans()
            .list_plans(owner)
            .await
            .context("Failed to list plans")?;
        let summaries = PlanSummaries(plans.iter().map(PlanSummary::from).collect());

        self.renderer.render(&summaries.to_string())
    }

    async fn show_plan(&self, params: &Id) -> Result<()> {
        let plan = self.load_plan(params.id).await?;
        self.renderer.render(&plan.to_string())
    }

    async fn import_plan(&self, args: ImportPlanArgs) -> Result<()> {
        let PlanSource::Local(store) = &self.source else {
            bail!("Plans can only be imported into the local store");
        };

        let content_md = std::fs::read_to_string(&args.file)
            .with_context(|| format!("Failed to read {}", args.file.display()))?;
        let title = args.title.unwrap_or_else(|| title_from_path(&args.file));

        let plan = store
            .import_plan(&ImportPlan { title, content_md })
            .await
            .context("Failed to import plan")?;

        let status = OperationStatus::success(format!(
            "Imported plan '{}' (ID: {}) with {} steps",
            plan.title,
            plan.id,
            plan.steps().len()
        ));
        self.renderer.render(&status.to_string())
    }

    async fn delete_plan(&self, params: &Id) -> Result<()> {
        let status = match self.plans().delete_plan(params.id).await {
            Ok(()) => OperationStatus::success(format!("Deleted plan {}", params.id)),
            Err(e @ StudyError::PlanNotFound { .. }) => OperationStatus::failure(e.to_string()),
            Err(e) => return Err(e).context("Failed to delete plan"),
        };
        self.renderer.render(&status.to_string())
    }

    async fn create_plan(&self, args: CreatePlanArgs) -> Result<()> {
        let params = args.into_params(self.require_user()?);
        let plan = self
            .client
            .create_plan(&params)
            .await
            .context("Failed to generate plan")?;
        self.renderer.render(&plan.to_string())
    }

    async fn list_steps(&self, params: &Id) -> Result<()> {
        let plan = self.load_plan(params.id).await?;
        self.renderer.render(&format!("# {}\n\n", plan.title))?;
        self.renderer.render(&Steps(plan.steps()).to_string())
    }

    async fn show_step(&self, params: &StepRef) -> Result<()> {
        let plan = self.load_plan(params.plan_id).await?;
        let steps = plan.steps();
        let index = params.index()?;
        let step = steps.get(index).ok_or(StudyError::StepOutOfRange {
            index,
            len: steps.len(),
        })?;

        let resolver = ResourceResolver::new(self.client.clone());
        let resource = resolver.resolve(&step.content).await;

        let view = StepView {
            number: params.number,
            total: steps.len(),
            step,
            resource: Some(&resource),
        };
        self.renderer.render(&view.to_string())
    }

    /// Runs an interactive quiz on one step, reading answers from stdin.
    pub async fn take_quiz(&self, params: &StepRef) -> Result<()> {
        let user_id = self.require_user()?;
        let plan = self.load_plan(params.plan_id).await?;
        let index = params.index()?;

        let mut controller =
            StudyPlanController::new(Services::from_backend(self.client.clone()), user_id);
        controller.select_plan(plan);
        controller.open_step(index).await?;

        if let Some(step) = controller.selected_step() {
            let view = StepView {
                number: params.number,
                total: controller.steps().len(),
                step,
                resource: controller.resource().resource(),
            };
            self.renderer.render(&view.to_string())?;
        }

        let quiz = controller
            .start_quiz()
            .await
            .context("Failed to generate quiz")?
            .clone();
        self.renderer.render(&format!("## Quiz\n\n{quiz}\n"))?;

        loop {
            self.renderer.prompt("Your answer: ")?;
            let mut line = String::new();
            let read = io::stdin()
                .read_line(&mut line)
                .context("Failed to read answer")?;
            if read == 0 {
                bail!("No answer given");
            }

            let Some(option) = quiz.option_for_input(&line) else {
                self.renderer.render(&format!(
                    "Enter an option number between 1 and {} or the option text.\n",
                    quiz.options.len()
                ))?;
                continue;
            };
            debug!("Submitting answer '{option}'");

            let feedback = controller.submit_answer(option).await?;
            self.renderer.render(&feedback.to_string())?;
            if feedback.is_final() {
                return Ok(());
            }
        }
    }

    async fn register_user(&self, params: &RegisterUser) -> Result<()> {
        let user = self
            .client
            .register(params)
            .await
            .context("Failed to register learner")?;
        self.renderer.render(&user.to_string())
    }

    async fn show_user(&self, user_id: u64) -> Result<()> {
        let user = self
            .client
            .get_user(user_id)
            .await
            .with_context(|| format!("Failed to load learner {user_id}"))?;
        self.renderer.render(&user.to_string())
    }
}

fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Untitled plan".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_path() {
        assert_eq!(title_from_path(Path::new("/tmp/grade5-fractions.md")), "grade5-fractions");
        assert_eq!(title_from_path(Path::new("notes")), "notes");
    }
}
