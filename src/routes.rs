//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /r/{code}`    - Short link redirect (public, not rate limited)
//! - `GET  /health`      - Health check (public)
//! - `GET  /`, `POST /`  - Link management (rate limited)
//! - `GET  /api/qr/*`    - QR image downloads (rate limited)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on management and QR routes
//! - **Path normalization** - Trailing slash handling, applied in [`crate::server`]

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;

/// Constructs the application router with all routes and middleware.
///
/// Rate limiting keys on the peer address, so the router must be served with
/// connect info (see [`crate::server::run`]).
pub fn app_router(state: AppState) -> Router {
    let limited = api::routes::management_routes()
        .nest("/api", api::routes::qr_routes())
        .layer(rate_limit::layer());

    Router::new()
        .route("/r/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .merge(limited)
        .with_state(state)
        .layer(tracing::layer())
}
