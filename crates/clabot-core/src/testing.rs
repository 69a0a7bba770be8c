//! In-memory fakes for the platform and the sheet, recording every call.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::Config;
use crate::error::CheckError;
use crate::event::{EventKind, PullRequest};
use crate::identity::Identifier;
use crate::platform::{CommitStatus, Platform, SheetFetcher};

pub fn test_config() -> Config {
    Config::new(
        "octo/widgets".parse().unwrap(),
        EventKind::PullRequest,
        PathBuf::from("/tmp/event.json"),
    )
}

/// Run `f` with a plain-text fmt subscriber installed and return what it logged.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buf = Arc::new(Mutex::new(Vec::new()));
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .with_writer(move || LogBuffer(writer.clone()))
        .finish();

    let out = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buf.lock().unwrap()).into_owned();
    (out, logs)
}

struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn pull_request(number: u64, author: &str) -> PullRequest {
    PullRequest {
        number,
        author: Identifier::new(author),
        head_sha: format!("sha-{number}"),
        base_ref: "main".into(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FileContents { path: String, revision: String },
    PullRequest(u64),
    Status { sha: String, status: CommitStatus },
    Comment { number: u64, body: String },
}

#[derive(Default)]
pub struct FakePlatform {
    files: HashMap<(String, String), Vec<u8>>,
    pulls: HashMap<u64, PullRequest>,
    fail_reports: bool,
    calls: Mutex<Vec<Call>>,
}

impl FakePlatform {
    pub fn with_file(mut self, path: &str, revision: &str, content: &str) -> Self {
        self.files
            .insert((path.into(), revision.into()), content.as_bytes().to_vec());
        self
    }

    pub fn with_pull(mut self, pr: PullRequest) -> Self {
        self.pulls.insert(pr.number, pr);
        self
    }

    /// Make status and comment posting fail.
    pub fn failing_reports(mut self) -> Self {
        self.fail_reports = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn statuses(&self) -> Vec<(String, CommitStatus)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Status { sha, status } => Some((sha, status)),
                _ => None,
            })
            .collect()
    }

    pub fn comments(&self) -> Vec<(u64, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Comment { number, body } => Some((number, body)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Platform for FakePlatform {
    async fn file_contents(&self, path: &str, revision: &str) -> Result<Vec<u8>, CheckError> {
        self.record(Call::FileContents {
            path: path.into(),
            revision: revision.into(),
        });
        self.files
            .get(&(path.to_string(), revision.to_string()))
            .cloned()
            .ok_or_else(|| CheckError::fetch(format!("{path}@{revision}"), "404 Not Found"))
    }

    async fn pull_request(&self, number: u64) -> Result<PullRequest, CheckError> {
        self.record(Call::PullRequest(number));
        self.pulls
            .get(&number)
            .cloned()
            .ok_or_else(|| CheckError::fetch(format!("pull request #{number}"), "404 Not Found"))
    }

    async fn create_status(&self, sha: &str, status: &CommitStatus) -> Result<(), CheckError> {
        self.record(Call::Status {
            sha: sha.into(),
            status: status.clone(),
        });
        if self.fail_reports {
            return Err(CheckError::fetch("status", "502 Bad Gateway"));
        }
        Ok(())
    }

    async fn create_comment(&self, number: u64, body: &str) -> Result<(), CheckError> {
        self.record(Call::Comment {
            number,
            body: body.into(),
        });
        if self.fail_reports {
            return Err(CheckError::fetch("comment", "502 Bad Gateway"));
        }
        Ok(())
    }
}

/// Serves a fixed CSV body or a fixed HTTP status.
#[derive(Default)]
pub struct FakeSheet {
    response: Option<Result<String, u16>>,
    fetches: Mutex<usize>,
}

impl FakeSheet {
    pub fn ok(body: &str) -> Self {
        Self {
            response: Some(Ok(body.into())),
            ..Self::default()
        }
    }

    pub fn status(code: u16) -> Self {
        Self {
            response: Some(Err(code)),
            ..Self::default()
        }
    }

    pub fn fetches(&self) -> usize {
        *self.fetches.lock().unwrap()
    }
}

#[async_trait]
impl SheetFetcher for FakeSheet {
    async fn fetch_csv(&self, url: &str) -> Result<Vec<u8>, CheckError> {
        *self.fetches.lock().unwrap() += 1;
        match &self.response {
            Some(Ok(body)) => Ok(body.as_bytes().to_vec()),
            Some(Err(code)) => Err(CheckError::fetch(url, format!("sheet returned {code}"))),
            None => Err(CheckError::fetch(url, "no response configured")),
        }
    }
}
