//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer and wraps
//! third-party capabilities.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL and in-memory repository implementations
//! - [`qr`] - QR image rendering on top of the `qrcode` and `image` crates

pub mod persistence;
pub mod qr;
