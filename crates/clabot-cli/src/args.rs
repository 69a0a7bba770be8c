//! Command-line and environment configuration.
//!
//! Every option can come from the variables a GitHub Actions runner exports,
//! so the workflow step usually passes no flags at all.

use std::path::PathBuf;

use clabot_core::config::DEFAULT_API_URL;
use clabot_core::{Config, ConfigError, EventKind, Repository};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "clabot", version, about = "Gate pull requests on CLA signatures")]
pub struct Args {
    /// Repository as `owner/name`.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: String,

    /// Triggering event kind (`pull_request` or `issue_comment`).
    #[arg(long, env = "GITHUB_EVENT_NAME")]
    pub event_name: String,

    /// Path to the event payload JSON written by the runner.
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: PathBuf,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Repo-relative path of the plain-text signer list.
    #[arg(long, env = "SIGNERS_PATH")]
    pub signers_path: Option<String>,

    /// CSV export URL of the signer spreadsheet.
    #[arg(long, env = "GOOGLE_SHEET_URL")]
    pub sheet_url: Option<String>,

    /// Text posted after `@author` when the CLA is missing.
    #[arg(long, env = "COMMENT_MSG")]
    pub comment_message: Option<String>,

    /// Comma-separated logins whose comments never trigger a check.
    #[arg(long, env = "BOT_IGNORE_AUTHORS")]
    pub ignore_authors: Option<String>,

    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,
}

impl Args {
    /// Split into the run configuration and the API token.
    pub fn into_config(self) -> Result<(Config, String), ConfigError> {
        let repository: Repository = self.repository.parse()?;
        if self.token.trim().is_empty() {
            return Err(ConfigError::Missing("GITHUB_TOKEN"));
        }

        let config = Config::new(
            repository,
            EventKind::parse(&self.event_name),
            self.event_path,
        )
        .with_signers_path(self.signers_path)
        .with_sheet_url(self.sheet_url)
        .with_comment_message(self.comment_message)
        .with_ignore_authors(self.ignore_authors.as_deref())
        .with_api_url(Some(self.api_url));

        Ok((config, self.token))
    }
}
