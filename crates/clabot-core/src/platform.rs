//! Outbound collaborators: the hosting platform and the spreadsheet export.
//!
//! The dispatch logic only talks to these traits, so tests can swap in
//! in-memory fakes that record every call.

use std::fmt;

use async_trait::async_trait;

use crate::error::CheckError;
use crate::event::PullRequest;

/// Context label attached to every status this bot posts.
pub const STATUS_CONTEXT: &str = "CLA check";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusState {
    Success,
    Failure,
}

impl StatusState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}

impl fmt::Display for StatusState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitStatus {
    pub state: StatusState,
    pub description: String,
    pub context: String,
}

/// Repository-scoped platform API. The repository itself is fixed at construction.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Raw content of `path` at `revision`.
    async fn file_contents(&self, path: &str, revision: &str) -> Result<Vec<u8>, CheckError>;

    async fn pull_request(&self, number: u64) -> Result<PullRequest, CheckError>;

    async fn create_status(&self, sha: &str, status: &CommitStatus) -> Result<(), CheckError>;

    async fn create_comment(&self, number: u64, body: &str) -> Result<(), CheckError>;
}

/// Fetches the CSV export of the signer spreadsheet.
#[async_trait]
pub trait SheetFetcher: Send + Sync {
    async fn fetch_csv(&self, url: &str) -> Result<Vec<u8>, CheckError>;
}
