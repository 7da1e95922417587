//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::repositories::ShortLinkRepository;
use crate::infrastructure::qr::QrRenderer;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub qr_renderer: Arc<QrRenderer>,
    /// Public base for short URLs; `None` derives it from request headers.
    pub base_url: Option<String>,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn ShortLinkRepository>,
        qr_renderer: QrRenderer,
        base_url: Option<String>,
        code_generation_attempts: usize,
    ) -> Self {
        let link_service = LinkService::new(repository)
            .with_code_generation_attempts(code_generation_attempts);

        Self {
            link_service: Arc::new(link_service),
            qr_renderer: Arc::new(qr_renderer),
            base_url,
        }
    }
}
