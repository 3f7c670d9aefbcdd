// Request handlers

use axum::{
    Json,
    extract::{State, rejection::BytesRejection},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use bytes::Bytes;

use super::{AppState, EXPORT_FILENAME, RequestContext};
use crate::error::ApiError;
use crate::results_repo;
use crate::validator;
use crate::version;
use crate::views;

/// GET / — static test-runner page, read from disk on every request.
pub(super) async fn landing_handler(State(state): State<AppState>) -> Response {
    match tokio::fs::read_to_string(&state.landing_page).await {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            tracing::error!(
                "Landing page {} unreadable: {}",
                state.landing_page.display(),
                e
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error loading page: {e}"),
            )
                .into_response()
        }
    }
}

/// POST /api/save-result — validate, then append exactly one row.
pub(super) async fn save_result_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let body = body?;
    let payload = validator::parse_payload(&body)?;
    let record =
        validator::validate_and_build(&payload, &ctx.submission_meta(), chrono::Utc::now())?;

    tracing::info!(
        client_ip = ctx.forwarded.client_ip.as_deref().unwrap_or(""),
        scheme = ctx.forwarded.scheme.as_deref().unwrap_or(""),
        host = ctx.forwarded.host.as_deref().unwrap_or(""),
        "Saving result: server={} download={} upload={}",
        record.server,
        record.download,
        record.upload
    );

    let repo = state.repo.clone();
    tokio::task::spawn_blocking(move || repo.append(&record)).await??;
    Ok(Json(serde_json::json!({ "status": "success" })))
}

/// GET /results — HTML table, newest first. Failures are plain text.
pub(super) async fn results_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Response {
    let repo = state.repo.clone();
    let loaded = tokio::task::spawn_blocking(move || repo.read_all())
        .await
        .map_err(|e| e.to_string())
        .and_then(|r| r.map_err(|e| e.to_string()));
    match loaded {
        Ok(records) => {
            Html(views::render_results_page(&records, &ctx.forwarded.prefix)).into_response()
        }
        Err(message) => {
            tracing::error!("Loading results failed: {}", message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error loading results: {message}"),
            )
                .into_response()
        }
    }
}

/// GET /download-results — full dataset re-serialized as CSV.
pub(super) async fn download_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = state.repo.clone();
    let body = tokio::task::spawn_blocking(move || {
        let records = repo.read_all()?;
        results_repo::to_csv(&records)
    })
    .await??;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={EXPORT_FILENAME}"),
            ),
        ],
        body,
    ))
}

/// GET /version — service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(version::identity())
}
