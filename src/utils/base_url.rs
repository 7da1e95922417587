//! Public base URL resolution for building short links.

use crate::AppError;
use axum::http::{HeaderMap, header};
use serde_json::json;

/// Determines the public base URL (`scheme://host[:port]`) for a request.
///
/// A configured base URL always wins. Otherwise the scheme is taken from
/// `X-Forwarded-Proto` (default `http`) and the authority from the `Host`
/// header, port included.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if no base URL is configured and the
/// `Host` header is missing or not valid UTF-8.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "qr.example.com:8080".parse().unwrap());
///
/// let base = resolve_base_url(None, &headers).unwrap();
/// assert_eq!(base, "http://qr.example.com:8080");
/// ```
pub fn resolve_base_url(configured: Option<&str>, headers: &HeaderMap) -> Result<String, AppError> {
    if let Some(base) = configured {
        return Ok(base.trim_end_matches('/').to_string());
    }

    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header", json!({})))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header", json!({})))?;

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| matches!(*v, "http" | "https"))
        .unwrap_or("http");

    Ok(format!("{}://{}", scheme, host))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue, header};

    #[test]
    fn test_configured_base_url_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("ignored.com"));

        let result = resolve_base_url(Some("https://qr.example.com/"), &headers);
        assert_eq!(result.unwrap(), "https://qr.example.com");
    }

    #[test]
    fn test_host_header_keeps_port() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost:3000"));

        let result = resolve_base_url(None, &headers);
        assert_eq!(result.unwrap(), "http://localhost:3000");
    }

    #[test]
    fn test_forwarded_proto_is_used() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("qr.example.com"));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https, http"));

        let result = resolve_base_url(None, &headers);
        assert_eq!(result.unwrap(), "https://qr.example.com");
    }

    #[test]
    fn test_unknown_forwarded_proto_falls_back_to_http() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("qr.example.com"));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("gopher"));

        let result = resolve_base_url(None, &headers);
        assert_eq!(result.unwrap(), "http://qr.example.com");
    }

    #[test]
    fn test_missing_host() {
        let headers = HeaderMap::new();

        let result = resolve_base_url(None, &headers);
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }
}
