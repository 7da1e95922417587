//! Application error type and its HTTP representation.
//!
//! Every failure path in the service ends up as an [`AppError`]. Each variant
//! maps to a distinct status code and machine-readable `code`, so callers can
//! tell "code does not exist" apart from "storage unavailable".

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::infrastructure::qr::QrRenderError;

/// Name of the unique constraint guarding `short_links.short_code`.
pub const SHORT_CODE_CONSTRAINT: &str = "short_links_short_code_key";

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serialized error payload returned to API clients.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Conflict { message: String, details: Value },

    #[error("{message}")]
    CodeGenerationExhausted { message: String, details: Value },

    #[error("{message}")]
    RandomSourceUnavailable { message: String, details: Value },

    #[error("{message}")]
    Render { message: String, details: Value },

    #[error("{message}")]
    StorageUnavailable { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn code_generation_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::CodeGenerationExhausted {
            message: message.into(),
            details,
        }
    }
    pub fn random_source_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::RandomSourceUnavailable {
            message: message.into(),
            details,
        }
    }
    pub fn render(message: impl Into<String>, details: Value) -> Self {
        Self::Render {
            message: message.into(),
            details,
        }
    }
    pub fn storage_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StorageUnavailable {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::CodeGenerationExhausted { .. }
            | AppError::RandomSourceUnavailable { .. }
            | AppError::Render { .. }
            | AppError::StorageUnavailable { .. }
            | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::Conflict { .. } => "conflict",
            AppError::CodeGenerationExhausted { .. } => "code_generation_exhausted",
            AppError::RandomSourceUnavailable { .. } => "random_source_unavailable",
            AppError::Render { .. } => "render_error",
            AppError::StorageUnavailable { .. } => "storage_unavailable",
            AppError::Internal { .. } => "internal_error",
        }
    }

    /// Converts the error into its serializable payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::Conflict { message, details }
            | AppError::CodeGenerationExhausted { message, details }
            | AppError::RandomSourceUnavailable { message, details }
            | AppError::Render { message, details }
            | AppError::StorageUnavailable { message, details }
            | AppError::Internal { message, details } => (message, details),
        };

        ErrorInfo {
            code: self.code(),
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let info = self.to_error_info();

        if status.is_server_error() {
            tracing::error!(
                code = info.code,
                details = %info.details,
                "{}",
                info.message
            );
        }

        (status, Json(ErrorBody { error: info })).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<QrRenderError> for AppError {
    fn from(e: QrRenderError) -> Self {
        match e {
            QrRenderError::EmptyInput => AppError::bad_request("URL parameter is required", json!({})),
            other => AppError::render(
                "Failed to generate QR code",
                json!({ "reason": other.to_string() }),
            ),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::bad_request("Validation failed", json!(errors))
    }
}

/// Maps a database error onto the application taxonomy.
///
/// A unique violation on [`SHORT_CODE_CONSTRAINT`] becomes [`AppError::Conflict`]
/// so that link creation can retry with a fresh code. Everything else,
/// including other unique violations, is reported as
/// [`AppError::StorageUnavailable`].
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
        && db.constraint() == Some(SHORT_CODE_CONSTRAINT)
    {
        return AppError::conflict(
            "Unique constraint violation",
            json!({ "constraint": db.constraint() }),
        );
    }

    AppError::storage_unavailable("Storage unavailable", json!({ "reason": e.to_string() }))
}
