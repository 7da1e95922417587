//! Short code generation and validation utilities.
//!
//! Codes are 8 characters drawn from the URL-safe base64 alphabet
//! (`A-Z`, `a-z`, `0-9`, `-`, `_`), giving 64^8 possible values.

use crate::error::AppError;
use base64::Engine as _;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Length of a generated short code in characters.
pub const CODE_LENGTH: usize = 8;

/// Random bytes consumed per code. 6 bytes encode to exactly 8 base64 chars.
const CODE_LENGTH_BYTES: usize = 6;

static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{8}$").expect("valid short code regex"));

/// Generates a cryptographically secure random short code.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding. Uniqueness against stored codes is not checked here; the
/// store's unique constraint rejects collisions and the caller retries.
///
/// # Errors
///
/// Returns [`AppError::RandomSourceUnavailable`] if the OS random source fails.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code()?;
/// assert_eq!(code.len(), 8);
/// assert!(is_valid_code(&code));
/// ```
pub fn generate_code() -> Result<String, AppError> {
    let mut buffer = [0u8; CODE_LENGTH_BYTES];

    getrandom::fill(&mut buffer).map_err(|e| {
        AppError::random_source_unavailable(
            "Random source unavailable",
            json!({ "reason": e.to_string() }),
        )
    })?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}

/// Returns true if `code` has the shape of a generated short code.
pub fn is_valid_code(code: &str) -> bool {
    CODE_REGEX.is_match(code)
}
