use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::info;

use crate::server::types::ApiErrorType;
use crate::timetable::RequestError;
use crate::types::AppState;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// GET /download/:filename
/// Returns a previously generated spreadsheet as an attachment
pub async fn get_download(
    Path(filename): Path<String>,
    State(s): State<Arc<AppState>>,
) -> Response {
    info!("GET /download/{filename}");

    // Artifacts live flat in the output directory; anything that tries to
    // escape it is treated as absent.
    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        return ApiErrorType::from(RequestError::NotFound).into_response();
    }

    let file_path = s.config.output_dir.join(&filename);
    match tokio::fs::read(&file_path).await {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{filename}\""),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(_) => ApiErrorType::from(RequestError::NotFound).into_response(),
    }
}
