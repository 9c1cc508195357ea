use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::server::endpoints::{download, generate, glossary, status};
use crate::types::AppState;

mod endpoints;
mod types;

/// Creates a router that can be used by `axum`.
///
/// # Parameters
/// - `app_state`: The app server state.
///
/// # Returns
/// The router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(status::get_health))
        .route("/api/glossary/:glossary_type", get(glossary::get_glossary))
        .route(
            "/api/generate-multiple",
            post(generate::post_generate_multiple),
        )
        .route("/download/:filename", get(download::get_download))
        .with_state(app_state)
}
