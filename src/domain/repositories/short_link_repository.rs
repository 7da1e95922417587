//! Repository trait for short link data access.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage contract for short links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortLinkRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryShortLinkRepository`] - in-process
/// - Test mocks available with `cfg(test)`
///
/// # Atomicity
///
/// [`ShortLinkRepository::increment_clicks`] must add exactly one to the stored
/// counter per call, even when called concurrently for the same code. It is
/// never implemented as read-then-write in application code.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkRepository: Send + Sync {
    /// Inserts a new link with `click_count = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code is already taken.
    /// Returns [`AppError::StorageUnavailable`] on storage errors.
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError>;

    /// Finds a link by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<ShortLink>, AppError>;

    /// Finds a link by short code without side effects.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError>;

    /// Atomically increments the click counter of `code`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ShortLink))` with the updated counter if the code exists
    /// - `Ok(None)` if it does not
    async fn increment_clicks(&self, code: &str) -> Result<Option<ShortLink>, AppError>;

    /// Replaces the target URL of link `id`.
    ///
    /// Returns `Ok(None)` and changes nothing if `id` does not exist.
    async fn update_target_url(
        &self,
        id: i64,
        target_url: &str,
    ) -> Result<Option<ShortLink>, AppError>;

    /// Lists every link, most recently created first.
    async fn list_all(&self) -> Result<Vec<ShortLink>, AppError>;

    /// Hard-deletes link `id`.
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if it did not exist.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Performs a cheap round trip to the backing store.
    async fn ping(&self) -> Result<(), AppError>;
}
