//! Stepwise CLI Application
//!
//! Command-line interface for stepping through study plans.

mod args;
mod cli;
mod renderer;

use std::time::Duration;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::{Cli, PlanSource};
use log::info;
use renderer::TerminalRenderer;
use stepwise_core::{ApiClient, ClientConfig, StoreBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        remote,
        api_url,
        user_id,
        timeout_secs,
        command,
    } = Args::parse();

    let config = ClientConfig::builder()
        .with_api_url(api_url)
        .with_timeout(timeout_secs.map(Duration::from_secs))
        .build()
        .context("Invalid backend settings")?;
    info!("Using backend at {}", config.api_url);
    let client = ApiClient::new(config);

    let source = if remote {
        PlanSource::Remote
    } else {
        let store = StoreBuilder::new()
            .with_database_path(database_file)
            .build()
            .await
            .context("Failed to open the local plan store")?;
        info!("Using local plans at {}", store.database_path().display());
        PlanSource::Local(store)
    };

    let cli = Cli::new(source, client, user_id, TerminalRenderer::new(!no_color));

    match command {
        Some(Plan { command }) => cli.handle_plan_command(command).await,
        Some(Step { command }) => cli.handle_step_command(command).await,
        Some(Quiz(args)) => cli.take_quiz(&args.step.into()).await,
        Some(User { command }) => cli.handle_user_command(command).await,
        None => cli.list_plans().await,
    }
}
