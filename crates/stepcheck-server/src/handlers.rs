// SPDX-License-Identifier: Apache-2.0

use crate::badge::BadgeAssets;
use crate::notify;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::collections::HashMap;
use stepcheck_core::validate_pull_request;
use stepcheck_model::{
    PullRequestEvent, ValidationOutcome, ACTION_CLOSED, ACTION_OPENED, EVENT_PULL_REQUEST,
};
use tracing::{info, warn};

const SVG_MEDIA_TYPE: &str = "image/svg+xml";

fn badge_response(badges: &BadgeAssets, outcome: ValidationOutcome) -> Response {
    // Caching stays disabled so a later tag move is reflected immediately.
    (
        [(CONTENT_TYPE, SVG_MEDIA_TYPE), (CACHE_CONTROL, "no-cache")],
        badges.for_outcome(outcome).to_vec(),
    )
        .into_response()
}

/// `GET /tag?pr=<id>` — the badge endpoint. The requester only ever sees
/// one of the four fixed icon states, never raw error text.
pub(crate) async fn tag_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let pr_id = params.get("pr").map(String::as_str).unwrap_or("").trim();
    if pr_id.is_empty() {
        // Rejected before the engine runs; no upstream call happens.
        return badge_response(&state.badges, ValidationOutcome::RequestError);
    }
    let report = validate_pull_request(state.host.as_ref(), &state.check, pr_id).await;
    info!(pr = pr_id, outcome = report.outcome.as_str(), "validation finished");
    badge_response(&state.badges, report.outcome)
}

pub(crate) async fn healthz_handler() -> Response {
    Json(json!({"status": "ok"})).into_response()
}

/// `POST /update` — the hosting webhook. Side effects run as spawned
/// tasks with their own failure containment; they never alter the
/// response or a validation outcome already produced.
pub(crate) async fn update_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let event_kind = headers
        .get("x-github-event")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if event_kind != EVENT_PULL_REQUEST {
        return StatusCode::OK;
    }

    let event: PullRequestEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(err) => {
            warn!(error = %err, "webhook payload decode failed");
            return StatusCode::BAD_REQUEST;
        }
    };
    let number = if event.pull_request.number != 0 {
        event.pull_request.number
    } else {
        event.number
    };

    match event.action.as_str() {
        ACTION_OPENED => {
            let pr_body = event.pull_request.body.unwrap_or_default();
            tokio::spawn(notify::attach_badge(state, number, pr_body));
        }
        ACTION_CLOSED if event.pull_request.merged => {
            tokio::spawn(notify::announce_release(state, number));
        }
        other => {
            info!(action = other, number, "ignoring pull request action");
        }
    }
    StatusCode::OK
}
