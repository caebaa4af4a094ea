// SPDX-License-Identifier: Apache-2.0

use crate::config::RegistryConfig;
use std::fmt::{Display, Formatter};
use stepcheck_model::ChangedFile;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LocateError {
    /// The pull request does not touch any step definition.
    NotFound,
    /// The pull request touches more than one step definition. The hosting
    /// API does not guarantee list order, so picking one silently would be
    /// order-dependent; ambiguity is rejected instead.
    MultipleCandidates(Vec<String>),
}

impl Display for LocateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => f.write_str("no step definition in changed files"),
            Self::MultipleCandidates(paths) => {
                write!(f, "multiple step definitions in changed files: {paths:?}")
            }
        }
    }
}

impl std::error::Error for LocateError {}

pub(crate) fn is_step_file(path: &str, registry: &RegistryConfig) -> bool {
    path.starts_with(&registry.steps_root)
        && path
            .strip_suffix(&registry.step_file_name)
            .is_some_and(|rest| rest.ends_with('/'))
}

/// Finds the single step-definition entry in a changed-file list.
pub fn locate_step_file<'a>(
    files: &'a [ChangedFile],
    registry: &RegistryConfig,
) -> Result<&'a ChangedFile, LocateError> {
    let mut matches = files.iter().filter(|f| is_step_file(&f.filename, registry));
    let first = matches.next().ok_or(LocateError::NotFound)?;
    let extra: Vec<String> = matches.map(|f| f.filename.clone()).collect();
    if !extra.is_empty() {
        let mut all = Vec::with_capacity(extra.len() + 1);
        all.push(first.filename.clone());
        all.extend(extra);
        return Err(LocateError::MultipleCandidates(all));
    }
    Ok(first)
}
