// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}

pub const VERSION_SEGMENTS: usize = 3;

pub fn parse_version(input: &str) -> Result<StepVersion, ValidationError> {
    StepVersion::parse(input)
}

/// A released step version: exactly three dot-separated non-negative
/// integer segments. Leading zeros and arbitrary magnitude are accepted;
/// this is a syntactic shape check, not an ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct StepVersion(String);

impl StepVersion {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if input.is_empty() {
            return Err(ValidationError("version must not be empty".to_string()));
        }
        let segments: Vec<&str> = input.split('.').collect();
        if segments.len() != VERSION_SEGMENTS {
            return Err(ValidationError(format!(
                "version must have exactly {VERSION_SEGMENTS} dot-separated segments (e.g. 1.2.3)"
            )));
        }
        for segment in segments {
            if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ValidationError(format!(
                    "version segment {segment:?} is not a non-negative integer"
                )));
            }
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for StepVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
