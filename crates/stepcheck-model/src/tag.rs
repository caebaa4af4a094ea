// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// One entry of a repository tag listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoTag {
    pub name: String,
    pub commit: TagCommit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCommit {
    pub sha: String,
}

impl RepoTag {
    #[must_use]
    pub fn new(name: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commit: TagCommit { sha: sha.into() },
        }
    }
}

/// Release payload; only the body text is consumed, as the raw content of
/// a release announcement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubRelease {
    #[serde(default)]
    pub body: Option<String>,
}
