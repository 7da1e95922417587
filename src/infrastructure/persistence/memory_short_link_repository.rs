//! In-process implementation of the short link repository.
//!
//! Backs `STORAGE_BACKEND=memory` for local development and the handler
//! integration tests. Data lives only as long as the process.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::{AppError, SHORT_CODE_CONSTRAINT};

#[derive(Default)]
struct Inner {
    next_id: i64,
    links: HashMap<i64, ShortLink>,
    ids_by_code: HashMap<String, i64>,
}

/// Short link storage held in memory behind a single `RwLock`.
///
/// Every mutation, including the click increment, runs under the write lock,
/// so concurrent increments of the same code are never lost.
#[derive(Default)]
pub struct MemoryShortLinkRepository {
    inner: RwLock<Inner>,
}

impl MemoryShortLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShortLinkRepository for MemoryShortLinkRepository {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let mut inner = self.inner.write().await;

        if inner.ids_by_code.contains_key(&new_link.short_code) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": SHORT_CODE_CONSTRAINT }),
            ));
        }

        inner.next_id += 1;
        let link = ShortLink::new(
            inner.next_id,
            new_link.name,
            new_link.short_code,
            new_link.target_url,
            0,
            Utc::now(),
        );

        inner.ids_by_code.insert(link.short_code.clone(), link.id);
        inner.links.insert(link.id, link.clone());

        Ok(link)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ShortLink>, AppError> {
        Ok(self.inner.read().await.links.get(&id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .ids_by_code
            .get(code)
            .and_then(|id| inner.links.get(id))
            .cloned())
    }

    async fn increment_clicks(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        let mut inner = self.inner.write().await;

        let Some(id) = inner.ids_by_code.get(code).copied() else {
            return Ok(None);
        };

        Ok(inner.links.get_mut(&id).map(|link| {
            link.click_count += 1;
            link.clone()
        }))
    }

    async fn update_target_url(
        &self,
        id: i64,
        target_url: &str,
    ) -> Result<Option<ShortLink>, AppError> {
        let mut inner = self.inner.write().await;

        Ok(inner.links.get_mut(&id).map(|link| {
            link.target_url = target_url.to_string();
            link.clone()
        }))
    }

    async fn list_all(&self) -> Result<Vec<ShortLink>, AppError> {
        let mut links: Vec<ShortLink> = self.inner.read().await.links.values().cloned().collect();
        links.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(links)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;

        match inner.links.remove(&id) {
            Some(link) => {
                inner.ids_by_code.remove(&link.short_code);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
