#![forbid(unsafe_code)]
//! PR validation engine.
//!
//! Composes four checks into a single four-terminal decision: locate the
//! step definition among a pull request's changed files, parse it, validate
//! the declared version's shape, and confirm an upstream tag still pins the
//! declared commit. All network access goes through the [`SourceHost`]
//! trait, so the whole engine runs against [`FakeHost`] in tests.

mod config;
mod fake_host;
mod host;
mod locator;
mod parser;
mod tags;
mod validate;

pub const CRATE_NAME: &str = "stepcheck-core";

pub use config::{CheckConfig, HostConfig, RegistryConfig};
pub use fake_host::FakeHost;
pub use host::{HostError, HostErrorCode, SourceHost};
pub use locator::{locate_step_file, LocateError};
pub use parser::{parse_step_file, ParseError, ParsedStep};
pub use tags::{release_endpoint, tag_pins_commit, tags_endpoint};
pub use validate::{pr_touches_step, validate_pull_request, ValidationReport};
