// SPDX-License-Identifier: Apache-2.0

use crate::notify::{BadgeAnnotator, NotifyError, TopicPublisher};
use async_trait::async_trait;
use std::sync::Arc;
use stepcheck_core::HostConfig;
use stepcheck_hosting::{DiscourseClient, GithubHost};

/// Bridges the hosting client onto the server's annotation seam, sharing
/// the same client the validation engine reads through.
pub struct GithubAnnotator {
    inner: Arc<GithubHost>,
    host_cfg: HostConfig,
}

impl GithubAnnotator {
    #[must_use]
    pub fn new(inner: Arc<GithubHost>, host_cfg: HostConfig) -> Self {
        Self { inner, host_cfg }
    }
}

#[async_trait]
impl BadgeAnnotator for GithubAnnotator {
    async fn set_pull_request_body(&self, number: u64, body: &str) -> Result<(), NotifyError> {
        self.inner
            .patch_pull_request_body(number, body)
            .await
            .map_err(|e| NotifyError(e.to_string()))
    }

    async fn release_notes(&self, git_url: &str, tag: &str) -> Result<String, NotifyError> {
        self.inner
            .release_notes(git_url, tag, &self.host_cfg)
            .await
            .map_err(|e| NotifyError(e.to_string()))
    }
}

#[async_trait]
impl TopicPublisher for DiscourseClient {
    async fn publish(&self, title: &str, raw: &str) -> Result<(), NotifyError> {
        self.publish_topic(title, raw)
            .await
            .map_err(|e| NotifyError(e.to_string()))
    }
}
