//! Router assembly: HTTP endpoints, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - draft editing under `/api/v1/draft/...`
/// - template management under `/api/v1/templates/...`
/// - form generation at `/api/v1/generate`
/// - Static SPA from `./static` with index fallback
/// - CORS (allow any origin/method/headers)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    // Static files with SPA fallback
    let static_service = ServeDir::new("./static")
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new("./static/index.html"));

    Router::new()
        .route("/api/v1/health", get(http::http_health))
        // Draft
        .route("/api/v1/draft", get(http::http_get_draft))
        .route("/api/v1/draft/title", put(http::http_put_title))
        .route("/api/v1/draft/reset", post(http::http_post_reset))
        .route("/api/v1/draft/questions", post(http::http_post_question))
        .route(
            "/api/v1/draft/questions/:index",
            put(http::http_put_question).delete(http::http_delete_question),
        )
        .route("/api/v1/draft/questions/:index/up", post(http::http_post_move_up))
        .route("/api/v1/draft/questions/:index/down", post(http::http_post_move_down))
        // Templates
        .route(
            "/api/v1/templates",
            get(http::http_get_templates).post(http::http_post_template),
        )
        .route("/api/v1/templates/:name", delete(http::http_delete_template))
        .route("/api/v1/templates/:name/load", post(http::http_post_load_template))
        // Submission
        .route("/api/v1/generate", post(http::http_post_generate))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Frontend fallback
        .fallback_service(static_service)
}
