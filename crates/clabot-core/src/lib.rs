//! CLA gate core: signer resolution, event decoding, dispatch, and reporting.

pub mod config;
pub mod dispatch;
mod error;
pub mod event;
pub mod identity;
pub mod platform;
pub mod report;
pub mod signers;

#[cfg(test)]
mod testing;

pub use config::{Config, Repository};
pub use dispatch::{Dispatcher, IgnoreReason, Outcome};
pub use error::{CheckError, ConfigError};
pub use event::{Event, EventKind, PullRequest, PullRequestPayload};
pub use identity::{Identifier, SignerSet};
pub use platform::{CommitStatus, Platform, SheetFetcher, StatusState};
pub use report::Verdict;
