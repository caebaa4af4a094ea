// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Closed set of terminal validation results. Exactly one is produced per
/// validation run and is mapped 1:1 to a rendered badge state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationOutcome {
    /// A tag named exactly the declared version points at the declared commit.
    Ok,
    /// Malformed or missing input, transport failure, or parse failure.
    RequestError,
    /// The declared version does not have the three-segment numeric shape.
    SemverError,
    /// No upstream tag pins the declared version at the declared commit.
    CommitMismatch,
}

impl ValidationOutcome {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::RequestError => "request_error",
            Self::SemverError => "semver_error",
            Self::CommitMismatch => "commit_mismatch",
        }
    }

    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}
