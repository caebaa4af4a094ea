// SPDX-License-Identifier: Apache-2.0

use crate::config::HostConfig;
use stepcheck_model::RepoTag;

fn api_repo_url(git_url: &str, host: &HostConfig) -> String {
    let trimmed = git_url.strip_suffix(".git").unwrap_or(git_url);
    match trimmed.strip_prefix(&host.web_base_url) {
        Some(repo) => format!("{}{repo}", host.api_base_url),
        None => trimmed.to_string(),
    }
}

/// Rewrites a public repository URL to its API tags endpoint: strip a
/// trailing `.git`, swap the web host prefix for the API repos prefix,
/// append `/tags`.
#[must_use]
pub fn tags_endpoint(git_url: &str, host: &HostConfig) -> String {
    format!("{}/tags", api_repo_url(git_url, host))
}

/// API endpoint of the release notes published for a tag.
#[must_use]
pub fn release_endpoint(git_url: &str, tag: &str, host: &HostConfig) -> String {
    format!("{}/releases/tags/{tag}", api_repo_url(git_url, host))
}

/// True when some tag pins `version` at exactly `commit`. Full-length,
/// case-sensitive comparison; no short-hash matching.
#[must_use]
pub fn tag_pins_commit(tags: &[RepoTag], version: &str, commit: &str) -> bool {
    tags.iter()
        .any(|t| t.name == version && t.commit.sha == commit)
}
