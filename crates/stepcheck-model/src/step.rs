// SPDX-License-Identifier: Apache-2.0

use crate::version::ValidationError;
use serde::{Deserialize, Serialize};

/// Raw body of a located step definition file.
///
/// The declared version is never read from the body; the registry layout
/// (`steps/<id>/<version>/step.yml`) makes the file path authoritative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDocument {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub source: Option<StepSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSource {
    #[serde(default)]
    pub git: String,
    #[serde(default)]
    pub commit: String,
}

/// The version/source-repository/commit triple a contributed step pins,
/// plus its optional display title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDefinition {
    pub version: String,
    pub source_git_url: String,
    pub source_commit: String,
    pub title: Option<String>,
}

impl StepDefinition {
    /// Combines a path-derived version with a decoded document body.
    /// A missing `source` block is an error, never a silent default.
    pub fn from_document(version: String, doc: StepDocument) -> Result<Self, ValidationError> {
        let source = doc
            .source
            .ok_or_else(|| ValidationError("step document has no source block".to_string()))?;
        let definition = Self {
            version,
            source_git_url: source.git,
            source_commit: source.commit,
            title: doc.title,
        };
        definition.validate()?;
        Ok(definition)
    }

    /// A definition is comparable against upstream tags only when all three
    /// pinned fields are non-empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.version.is_empty() {
            return Err(ValidationError("version must not be empty".to_string()));
        }
        if self.source_git_url.is_empty() {
            return Err(ValidationError(
                "source git url must not be empty".to_string(),
            ));
        }
        if self.source_commit.is_empty() {
            return Err(ValidationError(
                "source commit must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
