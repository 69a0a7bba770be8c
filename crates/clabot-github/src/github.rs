//! GitHub REST v3 client scoped to one repository.

use async_trait::async_trait;
use clabot_core::{CheckError, CommitStatus, Platform, PullRequest, PullRequestPayload, Repository};
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use tracing::{debug, info};

const API_VERSION: &str = "2022-11-28";
const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
/// Returns file contents as the raw body instead of base64 inside JSON.
const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw+json";

/// Platform implementation backed by the GitHub REST API.
pub struct GitHubClient {
    client: reqwest::Client,
    api_url: String,
    repository: Repository,
    token: String,
}

#[derive(Serialize)]
struct StatusBody<'a> {
    state: &'a str,
    description: &'a str,
    context: &'a str,
}

#[derive(Serialize)]
struct CommentBody<'a> {
    body: &'a str,
}

impl GitHubClient {
    /// `api_url` is like `https://api.github.com` (trailing slash optional).
    pub fn new(api_url: &str, repository: Repository, token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            repository,
            token,
        }
    }

    fn repo_url(&self, tail: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_url, self.repository.owner, self.repository.name, tail
        )
    }

    fn request(&self, method: Method, url: &str, accept: &'static str) -> RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(&self.token)
            .header(USER_AGENT, concat!("clabot/", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, accept)
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    /// Send and turn any non-2xx response into a fetch error carrying the body.
    async fn send(&self, target: &str, request: RequestBuilder) -> Result<Response, CheckError> {
        let resp = request
            .send()
            .await
            .map_err(|e| CheckError::fetch(target, e))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CheckError::fetch(target, format!("GitHub returned {status}: {body}")));
        }
        Ok(resp)
    }
}

#[async_trait]
impl Platform for GitHubClient {
    async fn file_contents(&self, path: &str, revision: &str) -> Result<Vec<u8>, CheckError> {
        let url = self.repo_url(&format!("contents/{}", path.trim_start_matches('/')));
        let target = format!("{path} at {revision}");
        debug!(url = %url, revision, "fetching signer file");

        let request = self
            .request(Method::GET, &url, RAW_MEDIA_TYPE)
            .query(&[("ref", revision)]);
        let resp = self.send(&target, request).await?;
        let bytes = resp.bytes().await.map_err(|e| CheckError::fetch(&target, e))?;
        Ok(bytes.to_vec())
    }

    async fn pull_request(&self, number: u64) -> Result<PullRequest, CheckError> {
        let url = self.repo_url(&format!("pulls/{number}"));
        let target = format!("pull request #{number}");
        info!(url = %url, "fetching pull request");

        let request = self.request(Method::GET, &url, JSON_MEDIA_TYPE);
        let resp = self.send(&target, request).await?;
        let payload: PullRequestPayload = resp
            .json()
            .await
            .map_err(|e| CheckError::format(&target, e))?;
        Ok(payload.into())
    }

    async fn create_status(&self, sha: &str, status: &CommitStatus) -> Result<(), CheckError> {
        let url = self.repo_url(&format!("statuses/{sha}"));
        let body = StatusBody {
            state: status.state.as_str(),
            description: &status.description,
            context: &status.context,
        };
        let request = self.request(Method::POST, &url, JSON_MEDIA_TYPE).json(&body);
        self.send(&format!("status for {sha}"), request).await?;
        Ok(())
    }

    async fn create_comment(&self, number: u64, body: &str) -> Result<(), CheckError> {
        let url = self.repo_url(&format!("issues/{number}/comments"));
        let request = self
            .request(Method::POST, &url, JSON_MEDIA_TYPE)
            .json(&CommentBody { body });
        self.send(&format!("comment on #{number}"), request).await?;
        Ok(())
    }
}
