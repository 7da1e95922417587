#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use axum_test::TestServer;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;

use qrlink::domain::entities::{NewShortLink, ShortLink};
use qrlink::domain::repositories::ShortLinkRepository;
use qrlink::error::AppError;
use qrlink::infrastructure::persistence::MemoryShortLinkRepository;
use qrlink::infrastructure::qr::QrRenderer;
use qrlink::routes::app_router;
use qrlink::state::AppState;

pub const BASE_URL: &str = "https://qr.example.com";

/// Injects a fixed peer address so the per-IP rate limiter can key requests.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

/// Repository whose every call fails as if the database were down.
pub struct UnavailableRepository;

fn unavailable() -> AppError {
    AppError::storage_unavailable("Storage unavailable", json!({ "reason": "connection refused" }))
}

#[async_trait]
impl ShortLinkRepository for UnavailableRepository {
    async fn create(&self, _new_link: NewShortLink) -> Result<ShortLink, AppError> {
        Err(unavailable())
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<ShortLink>, AppError> {
        Err(unavailable())
    }

    async fn find_by_code(&self, _code: &str) -> Result<Option<ShortLink>, AppError> {
        Err(unavailable())
    }

    async fn increment_clicks(&self, _code: &str) -> Result<Option<ShortLink>, AppError> {
        Err(unavailable())
    }

    async fn update_target_url(
        &self,
        _id: i64,
        _target_url: &str,
    ) -> Result<Option<ShortLink>, AppError> {
        Err(unavailable())
    }

    async fn list_all(&self) -> Result<Vec<ShortLink>, AppError> {
        Err(unavailable())
    }

    async fn delete(&self, _id: i64) -> Result<bool, AppError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(unavailable())
    }
}

pub fn create_test_state(
    repository: Arc<dyn ShortLinkRepository>,
    base_url: Option<&str>,
) -> AppState {
    AppState::new(
        repository,
        QrRenderer::default(),
        base_url.map(str::to_string),
        5,
    )
}

/// Memory-backed state with [`BASE_URL`] configured, plus the repository for seeding.
pub fn memory_state() -> (AppState, Arc<MemoryShortLinkRepository>) {
    let repository = Arc::new(MemoryShortLinkRepository::new());
    let state = create_test_state(repository.clone(), Some(BASE_URL));
    (state, repository)
}

/// Serves the full application router.
pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(app_router(state).layer(MockConnectInfoLayer)).unwrap()
}

pub async fn create_test_link(
    repository: &MemoryShortLinkRepository,
    name: &str,
    code: &str,
    url: &str,
) -> ShortLink {
    repository
        .create(NewShortLink {
            name: name.to_string(),
            short_code: code.to_string(),
            target_url: url.to_string(),
        })
        .await
        .unwrap()
}
