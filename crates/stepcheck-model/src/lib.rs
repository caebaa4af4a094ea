#![forbid(unsafe_code)]
//! Step registry model SSOT.
//!
//! Everything here is plain data: wire structs matching the hosting API,
//! the step definition extracted from a registry PR, and the closed set of
//! validation outcomes. No I/O lives in this crate.

mod outcome;
mod pull_request;
mod step;
mod tag;
mod version;

pub use outcome::ValidationOutcome;
pub use pull_request::{
    ChangedFile, PullRequestEvent, PullRequestInfo, ACTION_CLOSED, ACTION_OPENED,
    EVENT_PULL_REQUEST,
};
pub use step::{StepDefinition, StepDocument, StepSource};
pub use tag::{GithubRelease, RepoTag, TagCommit};
pub use version::{parse_version, StepVersion, ValidationError, VERSION_SEGMENTS};
