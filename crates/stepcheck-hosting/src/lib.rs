#![forbid(unsafe_code)]
//! Upstream collaborators: the source-hosting REST API and the discussion
//! forum. Plain HTTPS with a bounded per-call timeout; no retries, no
//! backoff, no rate limiting.

mod discourse;
mod github;

pub use discourse::{DiscourseClient, DiscourseConfig, ForumError};
pub use github::{GithubHost, GithubHostConfig};
