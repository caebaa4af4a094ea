// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use std::fmt::{Display, Formatter};
use stepcheck_model::{ChangedFile, RepoTag};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HostErrorCode {
    Network,
    Status,
    Decode,
}

impl HostErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network_error",
            Self::Status => "status_error",
            Self::Decode => "decode_error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostError {
    pub code: HostErrorCode,
    pub message: String,
}

impl HostError {
    #[must_use]
    pub fn new(code: HostErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl Display for HostError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for HostError {}

/// Read surface of the source-hosting API the engine depends on.
///
/// Each call is one unauthenticated GET reading the full body; no retries.
/// Any non-2xx status or transport failure surfaces as a [`HostError`] and
/// the caller decides how to map it.
#[async_trait]
pub trait SourceHost: Send + Sync {
    /// Changed-file list of a pull request (`GET /pulls/{id}/files`).
    async fn pull_request_files(&self, pr_id: &str) -> Result<Vec<ChangedFile>, HostError>;

    /// Raw content of one changed file.
    async fn file_content(&self, raw_url: &str) -> Result<Vec<u8>, HostError>;

    /// Tag listing of a repository, one fetch, first page as served
    /// upstream (pagination is not followed).
    async fn repo_tags(&self, tags_url: &str) -> Result<Vec<RepoTag>, HostError>;
}
