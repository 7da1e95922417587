//! Handlers for QR code image endpoints.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::api::dto::qr::QrQuery;
use crate::error::AppError;
use crate::infrastructure::qr::QrFormat;
use crate::state::AppState;

const CACHE_CONTROL: &str = "public, max-age=3600";

/// `GET /api/qr/svg?url=...` - SVG download (`qr-code.svg`).
pub async fn qr_svg_handler(
    State(state): State<AppState>,
    Query(query): Query<QrQuery>,
) -> Result<Response, AppError> {
    render_download(&state, &query, QrFormat::Svg)
}

/// `GET /api/qr/transparent?url=...` - PNG with transparent background
/// (`qr-code-transparent.png`).
pub async fn qr_transparent_handler(
    State(state): State<AppState>,
    Query(query): Query<QrQuery>,
) -> Result<Response, AppError> {
    render_download(&state, &query, QrFormat::TransparentPng)
}

/// `GET /api/qr/png?url=...` - PNG with the configured background (`qr-code.png`).
pub async fn qr_png_handler(
    State(state): State<AppState>,
    Query(query): Query<QrQuery>,
) -> Result<Response, AppError> {
    render_download(&state, &query, QrFormat::Png)
}

/// Renders `query.url` in `format` as an attachment.
///
/// # Errors
///
/// Returns 400 if `url` is missing or blank, 500 if rendering fails.
fn render_download(state: &AppState, query: &QrQuery, format: QrFormat) -> Result<Response, AppError> {
    let text = query.text()?;

    let bytes = match state.qr_renderer.render(text, format) {
        Ok(bytes) => {
            metrics::counter!("qrlink_qr_renders_total", "format" => format.as_str(), "outcome" => "ok")
                .increment(1);
            bytes
        }
        Err(e) => {
            metrics::counter!("qrlink_qr_renders_total", "format" => format.as_str(), "outcome" => "error")
                .increment(1);
            error!(url = text, format = format.as_str(), error = %e, "Failed to render QR code");
            return Err(e.into());
        }
    };

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", format.file_name()),
            ),
            (header::CACHE_CONTROL, CACHE_CONTROL.to_string()),
        ],
        bytes,
    )
        .into_response())
}
