//! HTTP collaborators: the GitHub REST API and the signer sheet export.

pub mod github;
pub mod sheet;

pub use github::GitHubClient;
pub use sheet::SheetClient;
