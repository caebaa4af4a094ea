// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// One entry of the pull-request changed-file listing
/// (`GET /pulls/{id}/files`). Field names match the hosting API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFile {
    pub filename: String,
    pub raw_url: String,
}

pub const EVENT_PULL_REQUEST: &str = "pull_request";
pub const ACTION_OPENED: &str = "opened";
pub const ACTION_CLOSED: &str = "closed";

/// Webhook payload for pull-request events. Only the action, number, and
/// nested body/merged fields are consumed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestEvent {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub number: u64,
    #[serde(default)]
    pub pull_request: PullRequestInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestInfo {
    #[serde(default)]
    pub merged: bool,
    #[serde(default)]
    pub number: u64,
    #[serde(default)]
    pub body: Option<String>,
}
