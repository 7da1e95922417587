//! Data Transfer Objects for API requests and responses.
//!
//! Management requests arrive form-encoded and are validated with `validator`
//! before reaching the service layer. Responses are JSON.

pub mod health;
pub mod link_view;
pub mod management;
pub mod qr;
