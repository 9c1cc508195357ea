//! Error types for request validation and spreadsheet generation.

use thiserror::Error;

/// Errors that can occur while processing a form submission.
#[derive(Debug, Error, Clone)]
pub enum RequestError {
    /// A required field is absent, null, or empty
    #[error("Entry is missing required field: {field}")]
    MissingField { field: String },

    /// The group-capacity mapping is structurally invalid
    #[error("{message}")]
    InvalidCapacityMapping { message: String },

    /// A requested artifact does not exist
    #[error("File not found")]
    NotFound,

    /// Unexpected failure during expansion, persistence, or serialization
    #[error("{message}")]
    Internal { message: String },
}

impl RequestError {
    /// Stable machine-readable identifier for this error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            RequestError::MissingField { .. } => "missing_field",
            RequestError::InvalidCapacityMapping { .. } => "invalid_capacity_mapping",
            RequestError::NotFound => "not_found",
            RequestError::Internal { .. } => "internal",
        }
    }

    /// Returns true if the caller is at fault (client-error status).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, RequestError::Internal { .. })
    }
}

impl From<rusqlite::Error> for RequestError {
    fn from(err: rusqlite::Error) -> Self {
        RequestError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for RequestError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        RequestError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for RequestError {
    fn from(err: std::io::Error) -> Self {
        RequestError::Internal {
            message: err.to_string(),
        }
    }
}
