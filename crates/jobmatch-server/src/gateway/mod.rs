//! HTTP gateway (Axum) for resume matching.
//!
//! This module is primarily used by the `jobmatch` server binary.

#![allow(missing_docs)]

pub mod error;
pub mod handler;
pub mod state;

#[cfg(test)]
mod handler_tests;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use handler::{match_csv_handler, match_handler};
pub use state::AppState;

/// Response header carrying a short machine-readable outcome.
pub const JOBMATCH_STATUS_HEADER: &str = "x-jobmatch-status";
pub const JOBMATCH_STATUS_HEALTHY: &str = "healthy";
pub const JOBMATCH_STATUS_READY: &str = "ready";
pub const JOBMATCH_STATUS_MATCHED: &str = "matched";

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>jobmatch</title>
</head>
<body>
<h1>Resume matcher</h1>
<form action="/v1/match/csv" method="post" enctype="multipart/form-data">
<p><label>Resume (PDF) <input type="file" name="resume" accept="application/pdf"></label></p>
<p><label>Job postings (CSV) <input type="file" name="jobs" accept=".csv,text/csv" required></label></p>
<p><label>Top matches <input type="number" name="top_k" min="1" value="10"></label></p>
<p><button type="submit">Download job_matches.csv</button></p>
</form>
</body>
</html>
"#;

pub fn create_router_with_state(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .route("/", get(index_handler))
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/v1/match", post(match_handler))
        .route("/v1/match/csv", post(match_csv_handler))
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub encoder: &'static str,
    pub phrase_pipeline: &'static str,
}

pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        JOBMATCH_STATUS_HEADER,
        HeaderValue::from_static(JOBMATCH_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

/// Models load before the listener binds, so a running server is always ready.
#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let components = ComponentStatus {
        http: JOBMATCH_STATUS_READY,
        encoder: state.engine.encoder().mode(),
        phrase_pipeline: state.engine.phrases().mode().as_str(),
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        JOBMATCH_STATUS_HEADER,
        HeaderValue::from_static(JOBMATCH_STATUS_READY),
    );

    (
        StatusCode::OK,
        headers,
        Json(ReadyResponse {
            status: "ok",
            components,
        }),
    )
        .into_response()
}
