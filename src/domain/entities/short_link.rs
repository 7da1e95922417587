//! Short link entity mapping a short code to a mutable target URL.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A persisted short link with its click counter.
///
/// `short_code` and `created_at` never change after creation. `target_url`
/// may be replaced any number of times, and `click_count` only grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ShortLink {
    pub id: i64,
    pub name: String,
    pub short_code: String,
    pub target_url: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(
        id: i64,
        name: String,
        short_code: String,
        target_url: String,
        click_count: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            short_code,
            target_url,
            click_count,
            created_at,
        }
    }

    /// Public redirect URL for this link under `base_url`.
    pub fn short_url(&self, base_url: &str) -> String {
        format!("{}/r/{}", base_url.trim_end_matches('/'), self.short_code)
    }
}

/// Input data for inserting a new short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub name: String,
    pub short_code: String,
    pub target_url: String,
}
