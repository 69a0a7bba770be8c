use thiserror::Error;

use crate::event::EventKind;

#[derive(Debug, Error)]
pub enum CheckError {
    /// The source has no location configured. Aggregation treats this as "skipped".
    #[error("{0} signer source is not configured")]
    NotConfigured(&'static str),

    #[error("fetching {target} failed: {message}")]
    Fetch { target: String, message: String },

    #[error("malformed {target}: {message}")]
    Format { target: String, message: String },

    #[error("cannot decode {kind} event: {source}")]
    Decode {
        kind: EventKind,
        #[source]
        source: serde_json::Error,
    },
}

impl CheckError {
    pub fn fetch(target: impl Into<String>, message: impl ToString) -> Self {
        Self::Fetch {
            target: target.into(),
            message: message.to_string(),
        }
    }

    pub fn format(target: impl Into<String>, message: impl ToString) -> Self {
        Self::Format {
            target: target.into(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("repository must be `owner/name`, got {0:?}")]
    Repository(String),

    #[error("{0} must not be empty")]
    Missing(&'static str),
}
