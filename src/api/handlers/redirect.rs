//! Handler for short link redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::is_valid_code;

/// Redirects a short code to its target URL and counts the click.
///
/// # Endpoint
///
/// `GET /r/{code}`
///
/// # Request Flow
///
/// 1. Reject codes that cannot have been generated (no storage access)
/// 2. Atomically increment the click counter and fetch the target
/// 3. Return 302 Found with `Location: target_url`
///
/// Every successful resolution is counted, including crawlers and link
/// preview fetchers.
///
/// # Errors
///
/// Returns 404 Not Found if the code does not exist.
/// Returns 500 with `storage_unavailable` if the store cannot be reached.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    if !is_valid_code(&code) {
        debug!(code, "Rejected malformed short code");
        metrics::counter!("qrlink_redirects_total", "outcome" => "not_found").increment(1);
        return Err(AppError::not_found(
            "Short link not found",
            json!({ "code": code }),
        ));
    }

    let link = match state.link_service.resolve_and_count(&code).await {
        Ok(link) => link,
        Err(e) => {
            let outcome = match e {
                AppError::NotFound { .. } => "not_found",
                _ => "error",
            };
            metrics::counter!("qrlink_redirects_total", "outcome" => outcome).increment(1);
            return Err(e);
        }
    };

    let location = location_header(&link.target_url)?;
    metrics::counter!("qrlink_redirects_total", "outcome" => "found").increment(1);

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Builds the `Location` value, percent-encoding the target if it carries
/// characters a header cannot hold.
fn location_header(target_url: &str) -> Result<HeaderValue, AppError> {
    if target_url.is_ascii()
        && let Ok(value) = HeaderValue::from_str(target_url)
    {
        return Ok(value);
    }

    warn!(target_url, "Target URL is not plain ASCII, re-encoding");

    url::Url::parse(target_url)
        .ok()
        .and_then(|url| HeaderValue::from_str(url.as_str()).ok())
        .ok_or_else(|| {
            AppError::internal(
                "Stored target URL cannot be used as a redirect",
                json!({ "target_url": target_url }),
            )
        })
}
