// HTTP routes: landing page, result submission, results table, CSV export

mod context;
mod http;

use axum::{
    Router,
    routing::{get, post},
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::results_repo::ResultsRepo;

pub use context::RequestContext;

/// Download name advertised by GET /download-results.
pub const EXPORT_FILENAME: &str = "speedtest_results.csv";

#[derive(Clone)]
pub struct AppState {
    pub(crate) repo: Arc<ResultsRepo>,
    pub(crate) landing_page: PathBuf,
    pub(crate) trusted_hops: usize,
}

pub fn app(repo: Arc<ResultsRepo>, config: &AppConfig) -> Router {
    let state = AppState {
        repo,
        landing_page: PathBuf::from(&config.landing.page_path),
        trusted_hops: config.proxy.trusted_hops,
    };
    Router::new()
        .route("/", get(http::landing_handler)) // GET /
        .route("/api/save-result", post(http::save_result_handler)) // POST /api/save-result
        .route("/results", get(http::results_handler)) // GET /results
        .route("/download-results", get(http::download_handler)) // GET /download-results
        .route("/version", get(http::version_handler)) // GET /version
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .with_state(state)
}
