//! Utility functions shared across the application.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`url_validator`] - Target URL validation
//! - [`base_url`] - Public base URL resolution from configuration or headers

pub mod base_url;
pub mod code_generator;
pub mod url_validator;
