//! Decoding of GitHub Actions event payloads.
//!
//! Only the fields the CLA check needs are read; everything else in the webhook
//! body is ignored by serde.

use std::fmt;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::CheckError;
use crate::identity::Identifier;

/// The declared kind of the triggering event (`GITHUB_EVENT_NAME`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    PullRequest,
    IssueComment,
    /// Anything else. Never decoded.
    Other(String),
}

impl EventKind {
    pub fn parse(name: &str) -> Self {
        match name.trim() {
            "pull_request" => Self::PullRequest,
            "issue_comment" => Self::IssueComment,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PullRequest => f.write_str("pull_request"),
            Self::IssueComment => f.write_str("issue_comment"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// A pull request as far as the CLA check is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub number: u64,
    pub author: Identifier,
    /// Commit the status is posted on.
    pub head_sha: String,
    /// Branch the signer file is read from.
    pub base_ref: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    PullRequestOpened(PullRequest),
    IssueComment {
        author: Identifier,
        body: String,
        number: u64,
        is_pull_request: bool,
    },
}

// ── Wire shapes ──

#[derive(Deserialize)]
struct UserPayload {
    login: String,
}

#[derive(Deserialize)]
struct HeadPayload {
    sha: String,
}

#[derive(Deserialize)]
struct BasePayload {
    #[serde(rename = "ref")]
    ref_name: String,
}

/// The `pull_request` object, shared by webhook payloads and `GET /pulls/{n}`.
#[derive(Deserialize)]
pub struct PullRequestPayload {
    number: u64,
    user: UserPayload,
    head: HeadPayload,
    base: BasePayload,
}

impl From<PullRequestPayload> for PullRequest {
    fn from(pr: PullRequestPayload) -> Self {
        Self {
            number: pr.number,
            author: Identifier::new(&pr.user.login),
            head_sha: pr.head.sha,
            base_ref: pr.base.ref_name,
        }
    }
}

#[derive(Deserialize)]
struct PullRequestEventPayload {
    pull_request: PullRequestPayload,
}

#[derive(Deserialize)]
struct CommentPayload {
    user: UserPayload,
    #[serde(default)]
    body: Option<String>,
}

#[derive(Deserialize)]
struct IssuePayload {
    number: u64,
    /// Present (and non-null) only when the issue is a pull request.
    #[serde(default)]
    pull_request: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct IssueCommentEventPayload {
    comment: CommentPayload,
    issue: IssuePayload,
}

/// Decode a payload of the given kind.
///
/// Returns `Ok(None)` for [`EventKind::Other`]: unknown kinds are ignored, not errors.
pub fn decode(kind: &EventKind, bytes: &[u8]) -> Result<Option<Event>, CheckError> {
    let decode_err = |source: serde_json::Error| CheckError::Decode {
        kind: kind.clone(),
        source,
    };

    let event = match kind {
        EventKind::PullRequest => {
            let payload: PullRequestEventPayload =
                serde_json::from_slice(bytes).map_err(decode_err)?;
            Event::PullRequestOpened(payload.pull_request.into())
        }
        EventKind::IssueComment => {
            let payload: IssueCommentEventPayload =
                serde_json::from_slice(bytes).map_err(decode_err)?;
            Event::IssueComment {
                author: Identifier::new(&payload.comment.user.login),
                body: payload.comment.body.unwrap_or_default(),
                number: payload.issue.number,
                is_pull_request: payload
                    .issue
                    .pull_request
                    .is_some_and(|v| !v.is_null()),
            }
        }
        EventKind::Other(_) => return Ok(None),
    };
    Ok(Some(event))
}

/// Read the payload file written by the runner and decode it.
pub async fn load(kind: &EventKind, path: &Path) -> Result<Option<Event>, CheckError> {
    if let EventKind::Other(_) = kind {
        return Ok(None);
    }
    info!(path = %path.display(), kind = %kind, "parsing event");
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| CheckError::fetch(format!("event payload {}", path.display()), e))?;
    decode(kind, &bytes)
}
