//! Run configuration, assembled once at start-up and passed by reference.

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::event::EventKind;
use crate::identity::Identifier;

pub const DEFAULT_COMMENT_MESSAGE: &str =
    "Please sign the CLA and then comment `@cla-bot check` on this PR.";

/// Comma-separated; the Actions bot must never re-trigger itself.
pub const DEFAULT_IGNORE_AUTHORS: &str = "github-actions[bot]";

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// `owner/name` coordinates of the repository being checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl FromStr for Repository {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(ConfigError::Repository(s.to_string())),
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Read-only snapshot of everything a run needs to know.
#[derive(Debug, Clone)]
pub struct Config {
    pub repository: Repository,
    pub event_kind: EventKind,
    pub event_path: PathBuf,
    /// Repo-relative path of the plain-text signer list.
    pub signers_path: Option<String>,
    /// Public CSV export of the signer spreadsheet.
    pub sheet_url: Option<String>,
    pub comment_message: String,
    pub ignore_authors: HashSet<Identifier>,
    pub api_url: String,
}

impl Config {
    pub fn new(repository: Repository, event_kind: EventKind, event_path: PathBuf) -> Self {
        Self {
            repository,
            event_kind,
            event_path,
            signers_path: None,
            sheet_url: None,
            comment_message: DEFAULT_COMMENT_MESSAGE.to_string(),
            ignore_authors: parse_ignore_authors(DEFAULT_IGNORE_AUTHORS),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    pub fn with_signers_path(mut self, path: Option<String>) -> Self {
        self.signers_path = non_empty(path);
        self
    }

    pub fn with_sheet_url(mut self, url: Option<String>) -> Self {
        self.sheet_url = non_empty(url);
        self
    }

    /// Blank or missing keeps the default message.
    pub fn with_comment_message(mut self, message: Option<String>) -> Self {
        if let Some(message) = non_empty(message) {
            self.comment_message = message;
        }
        self
    }

    /// Blank or missing keeps the default ignore-list.
    pub fn with_ignore_authors(mut self, raw: Option<&str>) -> Self {
        if let Some(raw) = raw.filter(|r| !r.trim().is_empty()) {
            self.ignore_authors = parse_ignore_authors(raw);
        }
        self
    }

    pub fn with_api_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = non_empty(url) {
            self.api_url = url;
        }
        self
    }

    pub fn is_ignored(&self, author: &Identifier) -> bool {
        self.ignore_authors.contains(author)
    }
}

/// Split a comma-separated list of logins, dropping blank entries.
pub fn parse_ignore_authors(raw: &str) -> HashSet<Identifier> {
    raw.split(',').filter_map(Identifier::parse).collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
