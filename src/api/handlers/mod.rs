//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod management;
pub mod qr;
pub mod redirect;

pub use health::health_handler;
pub use management::{link_action_handler, list_links_handler};
pub use qr::{qr_png_handler, qr_svg_handler, qr_transparent_handler};
pub use redirect::redirect_handler;
