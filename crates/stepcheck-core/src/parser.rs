// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};
use stepcheck_model::{StepDefinition, StepDocument, ValidationError};

#[derive(Debug)]
#[non_exhaustive]
pub enum ParseError {
    /// The body is not a decodable step document.
    Yaml(serde_yaml::Error),
    /// Decodable, but the pinned source fields are missing or empty.
    Invalid(ValidationError),
    /// The file path does not follow the `<root>/<id>/<version>/<file>`
    /// registry layout, so no version can be derived.
    Layout(String),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yaml(err) => write!(f, "step document decode failed: {err}"),
            Self::Invalid(err) => write!(f, "step document invalid: {err}"),
            Self::Layout(path) => write!(f, "path {path:?} has no <id>/<version> segments"),
        }
    }
}

impl std::error::Error for ParseError {}

/// A step definition together with the identifiers derived from its path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedStep {
    pub step_id: String,
    pub definition: StepDefinition,
}

/// Decodes a located step file. The version is the parent directory name
/// and the step id the grandparent, per the registry layout convention;
/// neither is read from the document body.
pub fn parse_step_file(path: &str, body: &[u8]) -> Result<ParsedStep, ParseError> {
    let (step_id, version) = split_layout(path)?;
    let doc: StepDocument = serde_yaml::from_slice(body).map_err(ParseError::Yaml)?;
    let definition = StepDefinition::from_document(version, doc).map_err(ParseError::Invalid)?;
    Ok(ParsedStep {
        step_id,
        definition,
    })
}

fn split_layout(path: &str) -> Result<(String, String), ParseError> {
    let mut parts = path.rsplit('/');
    let _file = parts.next();
    let version = parts.next().filter(|s| !s.is_empty());
    let step_id = parts.next().filter(|s| !s.is_empty());
    match (step_id, version) {
        (Some(id), Some(v)) => Ok((id.to_string(), v.to_string())),
        _ => Err(ParseError::Layout(path.to_string())),
    }
}
