//! Short link lifecycle, resolution and click counting.

use std::sync::Arc;

use serde_json::json;
use tokio_retry::RetryIf;
use tokio_retry::strategy::FixedInterval;
use tracing::{debug, info, warn};

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;

/// Default number of insert attempts per create.
pub const DEFAULT_CODE_GENERATION_ATTEMPTS: usize = 5;

/// Service for creating, resolving and managing short links.
///
/// Inputs are expected to be validated by the caller (see
/// [`crate::api::dto::management`]); this layer owns code generation, collision
/// retry and the not-found taxonomy.
pub struct LinkService {
    repository: Arc<dyn ShortLinkRepository>,
    code_generation_attempts: usize,
}

impl LinkService {
    /// Creates a new link service with the default retry budget.
    pub fn new(repository: Arc<dyn ShortLinkRepository>) -> Self {
        Self {
            repository,
            code_generation_attempts: DEFAULT_CODE_GENERATION_ATTEMPTS,
        }
    }

    /// Overrides the number of insert attempts per create (minimum 1).
    pub fn with_code_generation_attempts(mut self, attempts: usize) -> Self {
        self.code_generation_attempts = attempts.max(1);
        self
    }

    /// Creates a short link with a freshly generated code.
    ///
    /// # Code Generation
    ///
    /// A random 8-character code is generated per attempt. If the store
    /// rejects it as a duplicate, a new code is generated and the insert is
    /// retried, up to the configured number of attempts.
    ///
    /// # Errors
    ///
    /// - [`AppError::CodeGenerationExhausted`] if every attempt collided
    /// - [`AppError::RandomSourceUnavailable`] if the OS random source fails (not retried)
    /// - [`AppError::StorageUnavailable`] on storage errors (not retried)
    pub async fn create(&self, name: &str, target_url: &str) -> Result<ShortLink, AppError> {
        let attempts = self.code_generation_attempts;
        let strategy = FixedInterval::from_millis(0).take(attempts - 1);

        let insert = || {
            let repository = Arc::clone(&self.repository);
            let name = name.to_string();
            let target_url = target_url.to_string();
            async move {
                let short_code = generate_code()?;
                repository
                    .create(NewShortLink {
                        name,
                        short_code,
                        target_url,
                    })
                    .await
            }
        };

        let is_collision = |e: &AppError| {
            let collided = matches!(e, AppError::Conflict { .. });
            if collided {
                warn!("Short code collision, retrying with a new code");
            }
            collided
        };

        match RetryIf::spawn(strategy, insert, is_collision).await {
            Ok(link) => {
                info!(id = link.id, code = %link.short_code, "Short link created");
                metrics::counter!("qrlink_links_created_total").increment(1);
                Ok(link)
            }
            Err(AppError::Conflict { .. }) => Err(AppError::code_generation_exhausted(
                "Failed to generate a unique short code",
                json!({ "attempts": attempts }),
            )),
            Err(e) => Err(e),
        }
    }

    /// Replaces the target URL of link `id`.
    ///
    /// `short_code`, `click_count` and `created_at` are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id; nothing is modified.
    pub async fn update_target_url(&self, id: i64, target_url: &str) -> Result<ShortLink, AppError> {
        let link = self
            .repository
            .update_target_url(id, target_url)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "id": id })))?;

        info!(id, code = %link.short_code, "Short link target updated");
        Ok(link)
    }

    /// Retrieves a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn find_by_id(&self, id: i64) -> Result<ShortLink, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "id": id })))
    }

    /// Retrieves a link by short code without counting a click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not exist.
    pub async fn find_by_code(&self, code: &str) -> Result<ShortLink, AppError> {
        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Resolves a short code and counts the click.
    ///
    /// The increment is a single atomic storage operation, so concurrent
    /// resolutions of the same code are all counted. Returns the record with
    /// its updated counter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not exist.
    /// Storage failures surface as [`AppError::StorageUnavailable`], never as not found.
    pub async fn resolve_and_count(&self, code: &str) -> Result<ShortLink, AppError> {
        let link = self
            .repository
            .increment_clicks(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

        debug!(code, clicks = link.click_count, "Short link resolved");
        Ok(link)
    }

    /// Lists every link, most recently created first.
    pub async fn list_all(&self) -> Result<Vec<ShortLink>, AppError> {
        self.repository.list_all().await
    }

    /// Hard-deletes link `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if self.repository.delete(id).await? {
            info!(id, "Short link deleted");
            Ok(())
        } else {
            Err(AppError::not_found(
                "Short link not found",
                json!({ "id": id }),
            ))
        }
    }

    /// Checks that the backing store answers.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}
