//! Target URL validation.
//!
//! Target URLs are stored exactly as submitted, so validation only checks
//! shape: the value must parse as an absolute URL with an `http` or `https`
//! scheme and a host.

use url::Url;
use validator::ValidationError;

/// Errors that can occur while validating a target URL.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Checks that `input` is an absolute http(s) URL.
///
/// Rejects `javascript:`, `data:`, `file:` and other schemes that make no
/// sense as a redirect target.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for relative or malformed URLs.
/// Returns [`UrlValidationError::UnsupportedProtocol`] for non-HTTP(S) schemes.
/// Returns [`UrlValidationError::MissingHost`] when no host is present.
pub fn check_target_url(input: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(url)
}

/// `validator` adapter for [`check_target_url`].
pub fn validate_target_url(input: &str) -> Result<(), ValidationError> {
    check_target_url(input).map(|_| ()).map_err(|e| {
        let mut error = ValidationError::new("target_url");
        error.message = Some(e.to_string().into());
        error
    })
}
