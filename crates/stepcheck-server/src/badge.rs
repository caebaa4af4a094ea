// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::io;
use std::path::Path;
use stepcheck_model::ValidationOutcome;

/// File names of the badge icons inside a configured asset directory.
#[derive(Debug, Clone)]
pub struct BadgeFileNames {
    pub ok: String,
    pub request_error: String,
    pub semver_error: String,
    pub commit_mismatch: String,
}

impl Default for BadgeFileNames {
    fn default() -> Self {
        Self {
            ok: "ok.svg".to_string(),
            request_error: "cross.svg".to_string(),
            semver_error: "invalid-semver.svg".to_string(),
            commit_mismatch: "invalid-commit.svg".to_string(),
        }
    }
}

/// Badge bytes served per outcome, loaded once at startup. Compiled-in
/// defaults apply when no asset directory is configured.
#[derive(Debug, Clone)]
pub struct BadgeAssets {
    pub ok: Vec<u8>,
    pub request_error: Vec<u8>,
    pub semver_error: Vec<u8>,
    pub commit_mismatch: Vec<u8>,
}

impl BadgeAssets {
    #[must_use]
    pub fn embedded() -> Self {
        Self {
            ok: include_bytes!("../assets/ok.svg").to_vec(),
            request_error: include_bytes!("../assets/cross.svg").to_vec(),
            semver_error: include_bytes!("../assets/invalid-semver.svg").to_vec(),
            commit_mismatch: include_bytes!("../assets/invalid-commit.svg").to_vec(),
        }
    }

    pub fn load_dir(dir: &Path, names: &BadgeFileNames) -> io::Result<Self> {
        Ok(Self {
            ok: fs::read(dir.join(&names.ok))?,
            request_error: fs::read(dir.join(&names.request_error))?,
            semver_error: fs::read(dir.join(&names.semver_error))?,
            commit_mismatch: fs::read(dir.join(&names.commit_mismatch))?,
        })
    }

    #[must_use]
    pub fn for_outcome(&self, outcome: ValidationOutcome) -> &[u8] {
        match outcome {
            ValidationOutcome::Ok => &self.ok,
            ValidationOutcome::RequestError => &self.request_error,
            ValidationOutcome::SemverError => &self.semver_error,
            ValidationOutcome::CommitMismatch => &self.commit_mismatch,
        }
    }
}
