//! Verdicts and how they are reported back to the platform.

use tracing::{info, warn};

use crate::event::PullRequest;
use crate::identity::{Identifier, SignerSet};
use crate::platform::{CommitStatus, Platform, STATUS_CONTEXT, StatusState};

const SIGNED_DESCRIPTION: &str = "CLA signed ✔️";
const NOT_SIGNED_DESCRIPTION: &str = "CLA not signed ❌";

/// Outcome of checking one pull request author against the signer set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Compliant {
        head_sha: String,
    },
    NonCompliant {
        head_sha: String,
        author: Identifier,
        number: u64,
    },
}

impl Verdict {
    pub fn judge(pr: &PullRequest, signers: &SignerSet) -> Self {
        if signers.contains(&pr.author) {
            Self::Compliant {
                head_sha: pr.head_sha.clone(),
            }
        } else {
            Self::NonCompliant {
                head_sha: pr.head_sha.clone(),
                author: pr.author.clone(),
                number: pr.number,
            }
        }
    }

    pub fn head_sha(&self) -> &str {
        match self {
            Self::Compliant { head_sha } | Self::NonCompliant { head_sha, .. } => head_sha.as_str(),
        }
    }

    pub fn is_compliant(&self) -> bool {
        matches!(self, Self::Compliant { .. })
    }

    pub fn status(&self) -> CommitStatus {
        let (state, description) = match self {
            Self::Compliant { .. } => (StatusState::Success, SIGNED_DESCRIPTION),
            Self::NonCompliant { .. } => (StatusState::Failure, NOT_SIGNED_DESCRIPTION),
        };
        CommitStatus {
            state,
            description: description.to_string(),
            context: STATUS_CONTEXT.to_string(),
        }
    }

    /// The comment to leave on the pull request, if any.
    pub fn comment(&self, message: &str) -> Option<(u64, String)> {
        match self {
            Self::Compliant { .. } => None,
            Self::NonCompliant { author, number, .. } => {
                Some((*number, format!("@{author} {message}")))
            }
        }
    }
}

/// Post the status and, for a non-compliant verdict, the comment.
///
/// Best effort: failures are logged and never change the verdict.
pub async fn report(platform: &dyn Platform, verdict: &Verdict, comment_message: &str) {
    let status = verdict.status();
    let sha = verdict.head_sha();
    info!(
        sha,
        state = %status.state,
        description = %status.description,
        "posting status"
    );
    if let Err(e) = platform.create_status(sha, &status).await {
        warn!(sha, error = %e, "failed to post status");
    }

    if let Some((number, body)) = verdict.comment(comment_message) {
        info!(number, "posting CLA reminder comment");
        if let Err(e) = platform.create_comment(number, &body).await {
            warn!(number, error = %e, "failed to post comment");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakePlatform, pull_request};

    #[test]
    fn judge_uses_normalized_author() {
        let signers: SignerSet = ["Alice"].into_iter().collect();
        let pr = pull_request(1, " ALICE ");
        assert!(Verdict::judge(&pr, &signers).is_compliant());

        let pr = pull_request(2, "mallory");
        assert_eq!(
            Verdict::judge(&pr, &signers),
            Verdict::NonCompliant {
                head_sha: "sha-2".into(),
                author: Identifier::new("mallory"),
                number: 2,
            }
        );
    }

    #[test]
    fn status_values() {
        let ok = Verdict::Compliant {
            head_sha: "abc".into(),
        };
        let status = ok.status();
        assert_eq!(status.state.as_str(), "success");
        assert_eq!(status.description, SIGNED_DESCRIPTION);
        assert_eq!(status.context, "CLA check");
        assert!(ok.comment("hi").is_none());
    }

    #[test]
    fn comment_mentions_author() {
        let verdict = Verdict::NonCompliant {
            head_sha: "abc".into(),
            author: Identifier::new("Bob"),
            number: 9,
        };
        assert_eq!(verdict.status().state, StatusState::Failure);
        assert_eq!(
            verdict.comment("please sign"),
            Some((9, "@bob please sign".to_string()))
        );
    }

    #[tokio::test]
    async fn compliant_posts_only_status() {
        let platform = FakePlatform::default();
        let verdict = Verdict::Compliant {
            head_sha: "abc".into(),
        };
        report(&platform, &verdict, "msg").await;

        assert_eq!(
            platform.calls(),
            vec![Call::Status {
                sha: "abc".into(),
                status: verdict.status(),
            }]
        );
    }

    #[tokio::test]
    async fn report_failures_are_swallowed() {
        let platform = FakePlatform::default().failing_reports();
        let verdict = Verdict::NonCompliant {
            head_sha: "abc".into(),
            author: Identifier::new("bob"),
            number: 3,
        };
        report(&platform, &verdict, "msg").await;

        // The comment is still attempted after the status fails.
        assert_eq!(platform.statuses().len(), 1);
        assert_eq!(platform.comments(), vec![(3, "@bob msg".to_string())]);
    }
}
