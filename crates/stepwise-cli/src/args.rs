//! Command-line interface definitions using clap
//!
//! The CLI side of the parameter wrapper pattern: clap-derived argument
//! structures convert into the framework-free parameter types of
//! `stepwise_core::params`.
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Store / Backend
//! ```

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use stepwise_core::params::{CreatePlan, Id, RegisterUser, StepRef};

/// Step through study plans with learning resources and quizzes
///
/// Plans are numbered markdown documents. Each numbered line starts a step;
/// every step gets a learning resource and, on request, a short quiz that
/// awards experience points. Plans live in a local SQLite file unless
/// `--remote` is given, in which case they are read from the backend.
#[derive(Parser)]
#[command(version, about, name = "sw")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/stepwise/stepwise.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Read and delete plans on the backend instead of the local store
    #[arg(long, global = true)]
    pub remote: bool,

    /// Base URL of the study backend
    #[arg(long, global = true, env = "STEPWISE_API_URL")]
    pub api_url: Option<String>,

    /// Learner the backend should score quizzes for
    #[arg(long, global = true, env = "STEPWISE_USER_ID")]
    pub user_id: Option<u64>,

    /// Timeout for each backend request, in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Manage study plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Browse the steps of a plan
    #[command(alias = "s")]
    Step {
        #[command(subcommand)]
        command: StepCommands,
    },
    /// Take a quiz on one step, reading answers from stdin
    #[command(alias = "q")]
    Quiz(QuizArgs),
    /// Manage learner accounts on the backend
    #[command(alias = "u")]
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// List all plans
    #[command(alias = "l")]
    List,
    /// Show a plan and its step outline
    #[command(alias = "s")]
    Show(ShowPlanArgs),
    /// Import a markdown plan into the local store
    #[command(alias = "i")]
    Import(ImportPlanArgs),
    /// Delete a plan
    #[command(alias = "d")]
    Delete(DeletePlanArgs),
    /// Ask the backend to generate a new plan
    #[command(alias = "c")]
    Create(CreatePlanArgs),
}

#[derive(ClapArgs)]
pub struct ShowPlanArgs {
    #[arg(help = "Unique identifier of the plan to show")]
    pub id: u64,
}

impl From<ShowPlanArgs> for Id {
    fn from(val: ShowPlanArgs) -> Self {
        Id { id: val.id }
    }
}

/// Import a markdown plan
///
/// The file is stored as-is; steps are parsed from it whenever the plan is
/// shown. The title defaults to the file name without its extension.
#[derive(ClapArgs)]
pub struct ImportPlanArgs {
    #[arg(help = "Markdown file with numbered steps")]
    pub file: PathBuf,
    #[arg(short, long, help = "Title for the plan (defaults to the file name)")]
    pub title: Option<String>,
}

#[derive(ClapArgs)]
pub struct DeletePlanArgs {
    #[arg(help = "Unique identifier of the plan to delete")]
    pub id: u64,
}

impl From<DeletePlanArgs> for Id {
    fn from(val: DeletePlanArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(ClapArgs)]
pub struct CreatePlanArgs {
    #[arg(long, help = "School grade the plan is pitched at")]
    pub grade: u32,
    #[arg(long, help = "Subject to study, e.g. fractions")]
    pub subject: String,
    #[arg(long, help = "What the learner wants to achieve")]
    pub goal: String,
}

impl CreatePlanArgs {
    pub fn into_params(self, user_id: u64) -> CreatePlan {
        CreatePlan {
            user_id,
            grade: self.grade,
            subject: self.subject,
            goal: self.goal,
        }
    }
}

#[derive(Subcommand)]
pub enum StepCommands {
    /// List the steps of a plan
    #[command(alias = "l")]
    List(ListStepsArgs),
    /// Show one step with its learning resource
    #[command(alias = "s")]
    Show(StepArgs),
}

#[derive(ClapArgs)]
pub struct ListStepsArgs {
    #[arg(help = "Unique identifier of the plan")]
    pub plan_id: u64,
}

impl From<ListStepsArgs> for Id {
    fn from(val: ListStepsArgs) -> Self {
        Id { id: val.plan_id }
    }
}

#[derive(ClapArgs)]
pub struct StepArgs {
    #[arg(help = "Unique identifier of the plan")]
    pub plan_id: u64,
    #[arg(help = "Step number, starting at 1")]
    pub number: usize,
}

impl From<StepArgs> for StepRef {
    fn from(val: StepArgs) -> Self {
        StepRef {
            plan_id: val.plan_id,
            number: val.number,
        }
    }
}

/// Take a quiz on one step
///
/// Answer with the option number or the option text. You get three tries;
/// a wrong answer shows a hint, and the third wrong answer reveals the
/// correct option.
#[derive(ClapArgs)]
pub struct QuizArgs {
    #[command(flatten)]
    pub step: StepArgs,
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Register a learner, or look up the existing account with that name
    #[command(alias = "r")]
    Register(RegisterArgs),
    /// Show a learner's balances
    #[command(alias = "s")]
    Show(ShowUserArgs),
}

#[derive(ClapArgs)]
pub struct RegisterArgs {
    pub name: String,
    pub email: String,
}

impl From<RegisterArgs> for RegisterUser {
    fn from(val: RegisterArgs) -> Self {
        RegisterUser {
            name: val.name,
            email: val.email,
        }
    }
}

#[derive(ClapArgs)]
pub struct ShowUserArgs {
    #[arg(help = "Unique identifier of the learner")]
    pub id: u64,
}
