// SPDX-License-Identifier: Apache-2.0

use crate::config::CheckConfig;
use crate::host::{HostError, SourceHost};
use crate::locator::{is_step_file, locate_step_file};
use crate::parser::{parse_step_file, ParsedStep};
use crate::tags::{tag_pins_commit, tags_endpoint};
use stepcheck_model::{StepVersion, ValidationOutcome};
use tracing::{info, warn};

/// Result of one validation run plus the derived data collaborators
/// consume. Badge rendering needs only the outcome; the release
/// announcement flow reads the parsed step.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub outcome: ValidationOutcome,
    pub step: Option<ParsedStep>,
}

impl ValidationReport {
    fn terminal(outcome: ValidationOutcome) -> Self {
        Self {
            outcome,
            step: None,
        }
    }
}

/// Four-terminal decision, strictly sequential, short-circuiting at the
/// first failure: locate -> parse -> version shape -> tag consistency.
/// Each run is stateless; nothing is retried or cached.
pub async fn validate_pull_request(
    host: &dyn SourceHost,
    cfg: &CheckConfig,
    pr_id: &str,
) -> ValidationReport {
    let files = match host.pull_request_files(pr_id).await {
        Ok(files) => files,
        Err(err) => {
            warn!(pr = pr_id, error = %err, "changed-file listing failed");
            return ValidationReport::terminal(ValidationOutcome::RequestError);
        }
    };

    let located = match locate_step_file(&files, &cfg.registry) {
        Ok(file) => file,
        Err(err) => {
            info!(pr = pr_id, error = %err, "no usable step definition");
            return ValidationReport::terminal(ValidationOutcome::RequestError);
        }
    };

    let body = match host.file_content(&located.raw_url).await {
        Ok(body) => body,
        Err(err) => {
            warn!(pr = pr_id, file = %located.filename, error = %err, "step file fetch failed");
            return ValidationReport::terminal(ValidationOutcome::RequestError);
        }
    };

    let step = match parse_step_file(&located.filename, &body) {
        Ok(step) => step,
        Err(err) => {
            info!(pr = pr_id, file = %located.filename, error = %err, "step file parse failed");
            return ValidationReport::terminal(ValidationOutcome::RequestError);
        }
    };

    // Shape check before the network-bound tag fetch, to fail fast.
    if let Err(err) = StepVersion::parse(&step.definition.version) {
        info!(pr = pr_id, version = %step.definition.version, error = %err, "version shape rejected");
        return ValidationReport {
            outcome: ValidationOutcome::SemverError,
            step: Some(step),
        };
    }

    let tags_url = tags_endpoint(&step.definition.source_git_url, &cfg.host);
    let tags = match host.repo_tags(&tags_url).await {
        Ok(tags) => tags,
        Err(err) => {
            warn!(pr = pr_id, url = %tags_url, error = %err, "tag listing failed");
            return ValidationReport {
                outcome: ValidationOutcome::RequestError,
                step: Some(step),
            };
        }
    };

    let outcome = if tag_pins_commit(&tags, &step.definition.version, &step.definition.source_commit)
    {
        ValidationOutcome::Ok
    } else {
        warn!(
            pr = pr_id,
            version = %step.definition.version,
            commit = %step.definition.source_commit,
            "no tag pins the declared commit"
        );
        ValidationOutcome::CommitMismatch
    };

    ValidationReport {
        outcome,
        step: Some(step),
    }
}

/// Cheap signal for callers that only need to know whether a pull request
/// touches a step definition at all; nothing is fetched or parsed beyond
/// the changed-file list.
pub async fn pr_touches_step(
    host: &dyn SourceHost,
    cfg: &CheckConfig,
    pr_id: &str,
) -> Result<bool, HostError> {
    let files = host.pull_request_files(pr_id).await?;
    Ok(files
        .iter()
        .any(|f| is_step_file(&f.filename, &cfg.registry)))
}
