//! HTTP layer for request/response handling.
//!
//! Translates HTTP requests into service calls and formats responses.
//!
//! # Modules
//!
//! - [`dto`] - Form inputs, query parameters and JSON responses
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Rate limiting and request tracing
//! - [`routes`] - Route groups
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
