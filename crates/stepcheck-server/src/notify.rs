// SPDX-License-Identifier: Apache-2.0

use crate::AppState;
use async_trait::async_trait;
use std::fmt::{Display, Formatter};
use stepcheck_core::validate_pull_request;
use stepcheck_model::ValidationOutcome;
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyError(pub String);

impl Display for NotifyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for NotifyError {}

/// Writes the badge reference back to a PR description and reads release
/// notes for a tag.
#[async_trait]
pub trait BadgeAnnotator: Send + Sync {
    async fn set_pull_request_body(&self, number: u64, body: &str) -> Result<(), NotifyError>;
    async fn release_notes(&self, git_url: &str, tag: &str) -> Result<String, NotifyError>;
}

/// Publishes a release announcement topic to the discussion forum.
#[async_trait]
pub trait TopicPublisher: Send + Sync {
    async fn publish(&self, title: &str, raw: &str) -> Result<(), NotifyError>;
}

/// Stands in when no forum is configured; announcements are logged and
/// dropped.
pub struct NoopPublisher;

#[async_trait]
impl TopicPublisher for NoopPublisher {
    async fn publish(&self, title: &str, _raw: &str) -> Result<(), NotifyError> {
        info!(title, "forum not configured, dropping announcement");
        Ok(())
    }
}

pub struct NoopAnnotator;

#[async_trait]
impl BadgeAnnotator for NoopAnnotator {
    async fn set_pull_request_body(&self, _number: u64, _body: &str) -> Result<(), NotifyError> {
        Ok(())
    }

    async fn release_notes(&self, _git_url: &str, _tag: &str) -> Result<String, NotifyError> {
        Ok(String::new())
    }
}

fn badge_markdown(badge_base_url: &str, number: u64) -> String {
    format!(
        "![TagCheck]({}/tag?pr={number})\r\n\r\n",
        badge_base_url.trim_end_matches('/')
    )
}

/// `None` when the body already references the badge, making the body
/// patch idempotent across webhook redeliveries.
fn body_with_badge(badge_base_url: &str, number: u64, body: &str) -> Option<String> {
    let markdown = badge_markdown(badge_base_url, number);
    if body.contains(markdown.trim_end()) {
        return None;
    }
    Some(format!("{markdown}{body}"))
}

pub(crate) async fn attach_badge(state: AppState, number: u64, body: String) {
    let Some(new_body) = body_with_badge(&state.badge_base_url, number, &body) else {
        info!(number, "badge already referenced, skipping body patch");
        return;
    };
    if let Err(err) = state.annotator.set_pull_request_body(number, &new_body).await {
        error!(number, error = %err, "badge annotation failed");
    }
}

pub(crate) async fn announce_release(state: AppState, number: u64) {
    let report = validate_pull_request(state.host.as_ref(), &state.check, &number.to_string()).await;
    if report.outcome != ValidationOutcome::Ok {
        info!(
            number,
            outcome = report.outcome.as_str(),
            "merged PR did not validate, no announcement"
        );
        return;
    }
    let Some(step) = report.step else {
        return;
    };

    let title = format!("{} {}", step.step_id, step.definition.version);
    let raw = match state
        .annotator
        .release_notes(&step.definition.source_git_url, &step.definition.version)
        .await
    {
        Ok(notes) if !notes.trim().is_empty() => notes,
        Ok(_) => format!("{title} has been released."),
        Err(err) => {
            warn!(number, error = %err, "release notes fetch failed, using fallback text");
            format!("{title} has been released.")
        }
    };

    if let Err(err) = state.publisher.publish(&title, &raw).await {
        error!(number, error = %err, "forum announcement failed");
    }
}

#[cfg(test)]
mod tests {
    use super::{badge_markdown, body_with_badge};

    #[test]
    fn badge_markdown_points_at_the_tag_endpoint() {
        assert_eq!(
            badge_markdown("https://badge.example/", 42),
            "![TagCheck](https://badge.example/tag?pr=42)\r\n\r\n"
        );
    }

    #[test]
    fn badge_is_prepended_once() {
        let first = body_with_badge("https://badge.example", 42, "original body")
            .expect("badge injected");
        assert!(first.starts_with("![TagCheck](https://badge.example/tag?pr=42)"));
        assert!(first.ends_with("original body"));

        assert_eq!(body_with_badge("https://badge.example", 42, &first), None);
    }

    #[test]
    fn different_pr_numbers_do_not_collide() {
        let body = "![TagCheck](https://badge.example/tag?pr=41)\r\n\r\nbody";
        assert!(body_with_badge("https://badge.example", 42, body).is_some());
    }
}
