// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use serde::de::DeserializeOwned;
use std::time::Duration;
use stepcheck_core::{release_endpoint, HostConfig, HostError, HostErrorCode, SourceHost};
use stepcheck_model::{ChangedFile, GithubRelease, RepoTag};
use tracing::debug;

const USER_AGENT_VALUE: &str = "stepcheck";

#[derive(Debug, Clone)]
pub struct GithubHostConfig {
    /// API repos prefix, e.g. `https://api.github.com/repos/`.
    pub api_base_url: String,
    /// `owner/name` of the registry repository whose PRs are validated.
    pub repo_slug: String,
    /// Credential passed through on the PR body patch. Reads stay
    /// unauthenticated.
    pub token: Option<String>,
    /// Bound on every outbound call; an unresponsive upstream must not
    /// hold an inbound request open indefinitely.
    pub timeout: Duration,
}

impl Default for GithubHostConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.github.com/repos/".to_string(),
            repo_slug: "bitrise-io/bitrise-steplib".to_string(),
            token: None,
            timeout: Duration::from_secs(10),
        }
    }
}

pub struct GithubHost {
    config: GithubHostConfig,
    client: reqwest::Client,
}

impl GithubHost {
    pub fn new(config: GithubHostConfig) -> Result<Self, HostError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                HostError::new(HostErrorCode::Network, format!("client build failed: {e}"))
            })?;
        Ok(Self { config, client })
    }

    fn registry_url(&self, suffix: &str) -> String {
        format!(
            "{}{}{suffix}",
            self.config.api_base_url, self.config.repo_slug
        )
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, HostError> {
        debug!(url, "outbound GET");
        let resp = self
            .client
            .get(url)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .send()
            .await
            .map_err(|e| HostError::new(HostErrorCode::Network, format!("GET {url}: {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(HostError::new(
                HostErrorCode::Status,
                format!("GET {url} returned {status}"),
            ));
        }
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| HostError::new(HostErrorCode::Network, format!("GET {url} body: {e}")))?;
        Ok(bytes.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, HostError> {
        let bytes = self.get_bytes(url).await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| HostError::new(HostErrorCode::Decode, format!("decode {url}: {e}")))
    }

    /// Release notes published for a tag, resolved from the step's public
    /// repository URL. Empty when the release carries no body.
    pub async fn release_notes(
        &self,
        git_url: &str,
        tag: &str,
        host_cfg: &HostConfig,
    ) -> Result<String, HostError> {
        let url = release_endpoint(git_url, tag, host_cfg);
        let release: GithubRelease = self.get_json(&url).await?;
        Ok(release.body.unwrap_or_default())
    }

    /// Replaces the PR description (`PATCH /pulls/{number}`) with the
    /// configured credential passed through.
    pub async fn patch_pull_request_body(&self, number: u64, body: &str) -> Result<(), HostError> {
        let url = self.registry_url(&format!("/pulls/{number}"));
        let mut req = self
            .client
            .patch(&url)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .json(&serde_json::json!({ "body": body }));
        if let Some(token) = &self.config.token {
            req = req.header(AUTHORIZATION, format!("token {token}"));
        }
        let resp = req
            .send()
            .await
            .map_err(|e| HostError::new(HostErrorCode::Network, format!("PATCH {url}: {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(HostError::new(
                HostErrorCode::Status,
                format!("PATCH {url} returned {status}"),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl SourceHost for GithubHost {
    async fn pull_request_files(&self, pr_id: &str) -> Result<Vec<ChangedFile>, HostError> {
        self.get_json(&self.registry_url(&format!("/pulls/{pr_id}/files")))
            .await
    }

    async fn file_content(&self, raw_url: &str) -> Result<Vec<u8>, HostError> {
        self.get_bytes(raw_url).await
    }

    async fn repo_tags(&self, tags_url: &str) -> Result<Vec<RepoTag>, HostError> {
        self.get_json(tags_url).await
    }
}
