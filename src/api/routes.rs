//! API route groups.

use crate::api::handlers::{
    link_action_handler, list_links_handler, qr_png_handler, qr_svg_handler,
    qr_transparent_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Link management routes.
///
/// # Endpoints
///
/// - `GET  /` - List all links, newest first
/// - `POST /` - Create, update or delete a link (form `intent`)
pub fn management_routes() -> Router<AppState> {
    Router::new().route("/", get(list_links_handler).post(link_action_handler))
}

/// QR image routes, nested under `/api`.
///
/// # Endpoints
///
/// - `GET /qr/svg?url=`         - SVG
/// - `GET /qr/transparent?url=` - PNG with transparent background
/// - `GET /qr/png?url=`         - PNG with background
pub fn qr_routes() -> Router<AppState> {
    Router::new()
        .route("/qr/svg", get(qr_svg_handler))
        .route("/qr/transparent", get(qr_transparent_handler))
        .route("/qr/png", get(qr_png_handler))
}
