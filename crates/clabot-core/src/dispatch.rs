//! Event dispatch: decides whether a CLA check runs and drives it to a verdict.
//!
//! A pull request event goes straight to the check. An issue comment only
//! triggers one when it passes three guards (author not ignored, issue is a
//! pull request, body asks for a check); the pull request is then fetched
//! and checked exactly as if a pull request event had arrived.

use std::fmt;

use tracing::info;

use crate::config::Config;
use crate::error::CheckError;
use crate::event::{self, Event, PullRequest};
use crate::identity::Identifier;
use crate::platform::{Platform, SheetFetcher};
use crate::report::{self, Verdict};
use crate::signers;

/// Matched against the lowercased comment body.
pub const TRIGGER_PHRASES: &[&str] = &["@cla-bot", "cla-bot check"];

/// Why a run ended without a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    UnsupportedEvent(String),
    IgnoredAuthor(Identifier),
    NotAPullRequest(u64),
    NoTrigger(u64),
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedEvent(kind) => write!(f, "unsupported event {kind:?}"),
            Self::IgnoredAuthor(author) => write!(f, "comment by ignored author {author}"),
            Self::NotAPullRequest(number) => write!(f, "issue #{number} is not a pull request"),
            Self::NoTrigger(number) => write!(f, "comment on #{number} does not ask for a check"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Ignored(IgnoreReason),
    /// A verdict was computed and handed to the reporter.
    Reported(Verdict),
}

pub fn is_trigger(body: &str) -> bool {
    let body = body.to_lowercase();
    TRIGGER_PHRASES.iter().any(|phrase| body.contains(phrase))
}

pub struct Dispatcher<'a> {
    config: &'a Config,
    platform: &'a dyn Platform,
    sheet: &'a dyn SheetFetcher,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        config: &'a Config,
        platform: &'a dyn Platform,
        sheet: &'a dyn SheetFetcher,
    ) -> Self {
        Self {
            config,
            platform,
            sheet,
        }
    }

    /// Load the configured event payload and dispatch it.
    pub async fn run(&self) -> Result<Outcome, CheckError> {
        let kind = &self.config.event_kind;
        match event::load(kind, &self.config.event_path).await? {
            Some(event) => self.dispatch(event).await,
            None => {
                info!(event = %kind, "ignored event");
                Ok(Outcome::Ignored(IgnoreReason::UnsupportedEvent(
                    kind.to_string(),
                )))
            }
        }
    }

    pub async fn dispatch(&self, event: Event) -> Result<Outcome, CheckError> {
        match event {
            Event::PullRequestOpened(pr) => {
                info!(number = pr.number, author = %pr.author, "handling pull request");
                self.check(pr).await
            }
            Event::IssueComment {
                author,
                body,
                number,
                is_pull_request,
            } => {
                info!(number, author = %author, "handling issue comment");
                if self.config.is_ignored(&author) {
                    return Ok(self.ignore(IgnoreReason::IgnoredAuthor(author)));
                }
                if !is_pull_request {
                    return Ok(self.ignore(IgnoreReason::NotAPullRequest(number)));
                }
                if !is_trigger(&body) {
                    return Ok(self.ignore(IgnoreReason::NoTrigger(number)));
                }
                let pr = self.platform.pull_request(number).await?;
                self.check(pr).await
            }
        }
    }

    /// Resolve signers at the base branch, judge the author, and report.
    ///
    /// Signer load failures propagate before anything is posted.
    async fn check(&self, pr: PullRequest) -> Result<Outcome, CheckError> {
        let signers =
            signers::load_signers(self.config, self.platform, self.sheet, &pr.base_ref).await?;
        let verdict = Verdict::judge(&pr, &signers);
        info!(
            number = pr.number,
            author = %pr.author,
            compliant = verdict.is_compliant(),
            "CLA verdict"
        );
        report::report(self.platform, &verdict, &self.config.comment_message).await;
        Ok(Outcome::Reported(verdict))
    }

    fn ignore(&self, reason: IgnoreReason) -> Outcome {
        info!(%reason, "no CLA check needed");
        Outcome::Ignored(reason)
    }
}
