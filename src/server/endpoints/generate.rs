use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use crate::server::types::ApiErrorType;
use crate::timetable::{self, RawEntry};
use crate::types::AppState;

#[derive(Debug, Deserialize)]
pub struct GeneratePayload {
    #[serde(default)]
    pub entries: Vec<RawEntry>,
}

/// POST /api/generate-multiple
/// Validates and expands a batch of entries into one spreadsheet artifact
pub async fn post_generate_multiple(
    State(s): State<Arc<AppState>>,
    Json(payload): Json<GeneratePayload>,
) -> Response {
    info!(
        "POST /api/generate-multiple ({} entries)",
        payload.entries.len()
    );

    match timetable::process_submission(&s, &payload.entries).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "file_path": outcome.file_name,
                "form_ids": outcome.form_ids,
                "row_count": outcome.row_count,
                "entry_count": outcome.entry_count,
            })),
        )
            .into_response(),
        Err(e) => {
            if e.is_client_error() {
                info!("Submission rejected: {e}");
            } else {
                error!("Submission failed: {e}");
            }
            ApiErrorType::from(e).into_response()
        }
    }
}
