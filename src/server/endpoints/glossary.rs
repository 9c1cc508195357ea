use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::glossary::GlossaryType;
use crate::server::types::ApiErrorType;
use crate::types::AppState;

/// GET /api/glossary/:glossary_type
/// Returns the cached code/description pairs for one glossary category
pub async fn get_glossary(
    Path(glossary_type): Path<String>,
    State(s): State<Arc<AppState>>,
) -> Response {
    info!("GET /api/glossary/{glossary_type}");

    let Some(glossary_type) = GlossaryType::parse(&glossary_type) else {
        return ApiErrorType::from((StatusCode::BAD_REQUEST, "Invalid glossary type", None))
            .into_response();
    };

    let data: Vec<_> = s
        .glossary
        .entries(glossary_type)
        .iter()
        .map(|entry| entry.to_value(glossary_type))
        .collect();

    (StatusCode::OK, Json(data)).into_response()
}
