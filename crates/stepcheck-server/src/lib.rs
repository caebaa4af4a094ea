#![forbid(unsafe_code)]
//! HTTP surface of the step registry tag checker.
//!
//! Two routes carry the whole service: `GET /tag?pr=<id>` renders the
//! validation outcome as a badge image, and `POST /update` receives the
//! hosting webhook to annotate opened PRs and announce merged releases.
//! The validation engine itself lives in `stepcheck-core`; this crate only
//! wires it to axum and to the notification collaborators.

mod adapters;
mod badge;
mod handlers;
mod notify;
mod request_tracing;

use axum::routing::{get, post};
use axum::Router;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use stepcheck_core::{CheckConfig, SourceHost};

pub use adapters::GithubAnnotator;
pub use badge::{BadgeAssets, BadgeFileNames};
pub use notify::{BadgeAnnotator, NoopAnnotator, NoopPublisher, NotifyError, TopicPublisher};

pub const CRATE_NAME: &str = "stepcheck-server";

#[derive(Clone)]
pub struct AppState {
    pub host: Arc<dyn SourceHost>,
    pub check: Arc<CheckConfig>,
    pub badges: Arc<BadgeAssets>,
    pub annotator: Arc<dyn BadgeAnnotator>,
    pub publisher: Arc<dyn TopicPublisher>,
    pub badge_base_url: Arc<str>,
    request_seq: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(
        host: Arc<dyn SourceHost>,
        check: CheckConfig,
        badges: BadgeAssets,
        annotator: Arc<dyn BadgeAnnotator>,
        publisher: Arc<dyn TopicPublisher>,
        badge_base_url: &str,
    ) -> Self {
        Self {
            host,
            check: Arc::new(check),
            badges: Arc::new(badges),
            annotator,
            publisher,
            badge_base_url: Arc::from(badge_base_url),
            request_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    pub(crate) fn next_request_id(&self) -> String {
        format!("req-{:08x}", self.request_seq.fetch_add(1, Ordering::Relaxed))
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/tag", get(handlers::tag_handler))
        .route("/update", post(handlers::update_handler))
        .route("/healthz", get(handlers::healthz_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            request_tracing::request_tracing_middleware,
        ))
        .with_state(state)
}
