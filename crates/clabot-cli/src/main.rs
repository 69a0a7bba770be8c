mod args;

use std::process::ExitCode;

use anyhow::Context;
use clabot_core::{Dispatcher, Outcome};
use clabot_github::{GitHubClient, SheetClient};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::args::Args;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    tracing::info!("clabot v{}", env!("CARGO_PKG_VERSION"));

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("clabot error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let (config, token) = args.into_config().context("invalid configuration")?;
    let github = GitHubClient::new(&config.api_url, config.repository.clone(), token);
    let sheet = SheetClient::new();

    let outcome = Dispatcher::new(&config, &github, &sheet)
        .run()
        .await
        .with_context(|| format!("CLA check on {} ({})", config.repository, config.event_kind))?;

    match outcome {
        Outcome::Reported(verdict) => tracing::info!(
            sha = verdict.head_sha(),
            compliant = verdict.is_compliant(),
            "CLA check reported"
        ),
        Outcome::Ignored(reason) => tracing::info!(%reason, "nothing to do"),
    }
    Ok(())
}
