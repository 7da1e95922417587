//! Handlers for link management (list, create, update, delete).

use axum::{Form, Json, extract::State, http::HeaderMap};
use tracing::{debug, error};

use crate::api::dto::link_view::{LinkListResponse, LinkView};
use crate::api::dto::management::{ActionResponse, ManagementAction, ManagementForm};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::base_url::resolve_base_url;

/// Lists every short link, newest first.
///
/// # Endpoint
///
/// `GET /`
///
/// # Response
///
/// ```json
/// {
///   "base_url": "https://qr.example.com",
///   "links": [
///     {
///       "id": 1,
///       "name": "Menu",
///       "short_code": "AbCd1234",
///       "short_url": "https://qr.example.com/r/AbCd1234",
///       "target_url": "https://cafe.example/menu",
///       "click_count": 12,
///       "created_at": "2025-10-19T12:00:00Z"
///     }
///   ]
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if no base URL is configured and `Host` is missing.
pub async fn list_links_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<LinkListResponse>, AppError> {
    let base_url = resolve_base_url(state.base_url.as_deref(), &headers)?;

    let links = state
        .link_service
        .list_all()
        .await?
        .into_iter()
        .map(|link| LinkView::from_link(link, &base_url))
        .collect();

    Ok(Json(LinkListResponse { base_url, links }))
}

/// Applies a create, update or delete action submitted as a form.
///
/// # Endpoint
///
/// `POST /` (`application/x-www-form-urlencoded`)
///
/// | `intent` | fields | result |
/// |---|---|---|
/// | `create` | `name`, `targetUrl` | link plus `qr_code_image` |
/// | `update` | `id`, `targetUrl` | updated link |
/// | `delete` | `id` | `{ "success": true }` |
///
/// Deleting an id that does not exist is reported as success.
///
/// # Errors
///
/// Returns 400 for a missing or unknown intent ("Invalid action") and for
/// missing or invalid fields. Returns 404 when updating an unknown id.
/// Storage, code generation and QR failures are 500.
pub async fn link_action_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ManagementForm>,
) -> Result<Json<ActionResponse>, AppError> {
    match ManagementAction::try_from(form)? {
        ManagementAction::Create(input) => {
            let base_url = resolve_base_url(state.base_url.as_deref(), &headers)?;

            let link = state
                .link_service
                .create(&input.name, &input.target_url)
                .await?;
            let view = LinkView::from_link(link, &base_url);

            let qr_code_image = state.qr_renderer.data_url(&view.short_url).map_err(|e| {
                error!(short_url = %view.short_url, error = %e, "Failed to render QR code");
                AppError::from(e)
            })?;

            Ok(Json(ActionResponse {
                qr_code_image: Some(qr_code_image),
                ..ActionResponse::with_link(view)
            }))
        }
        ManagementAction::Update(input) => {
            let base_url = resolve_base_url(state.base_url.as_deref(), &headers)?;

            let link = state
                .link_service
                .update_target_url(input.id, &input.target_url)
                .await?;

            Ok(Json(ActionResponse::with_link(LinkView::from_link(
                link, &base_url,
            ))))
        }
        ManagementAction::Delete { id } => match state.link_service.delete(id).await {
            Ok(()) => Ok(Json(ActionResponse::ok())),
            Err(AppError::NotFound { .. }) => {
                debug!(id, "Delete of unknown link treated as success");
                Ok(Json(ActionResponse::ok()))
            }
            Err(e) => Err(e),
        },
    }
}
