//! Query parameters for QR endpoints.

use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;

/// `?url=` query shared by every `/api/qr/*` endpoint.
#[derive(Debug, Deserialize)]
pub struct QrQuery {
    pub url: Option<String>,
}

impl QrQuery {
    /// Returns the text to encode, rejecting a missing or blank `url`.
    pub fn text(&self) -> Result<&str, AppError> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                AppError::bad_request("URL parameter is required", json!({ "field": "url" }))
            })
    }
}
