// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumError(pub String);

impl Display for ForumError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ForumError {}

#[derive(Debug, Clone)]
pub struct DiscourseConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_username: String,
    pub category: String,
    pub timeout: Duration,
}

pub struct DiscourseClient {
    config: DiscourseConfig,
    client: reqwest::Client,
}

impl DiscourseClient {
    pub fn new(config: DiscourseConfig) -> Result<Self, ForumError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ForumError(format!("client build failed: {e}")))?;
        Ok(Self { config, client })
    }

    /// Creates a forum topic (`POST /posts.json`, form-encoded).
    pub async fn publish_topic(&self, title: &str, raw: &str) -> Result<(), ForumError> {
        let url = format!("{}/posts.json", self.config.base_url.trim_end_matches('/'));
        let form = [
            ("api_key", self.config.api_key.as_str()),
            ("api_username", self.config.api_username.as_str()),
            ("category", self.config.category.as_str()),
            ("title", title),
            ("raw", raw),
        ];
        let resp = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| ForumError(format!("POST {url}: {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ForumError(format!("invalid response code {status} from {url}")));
        }
        Ok(())
    }
}
