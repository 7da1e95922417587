//! JSON representation of a short link.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::ShortLink;

/// A short link as returned by the management API, with its full short URL.
#[derive(Debug, Serialize)]
pub struct LinkView {
    pub id: i64,
    pub name: String,
    pub short_code: String,
    pub short_url: String,
    pub target_url: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
}

impl LinkView {
    pub fn from_link(link: ShortLink, base_url: &str) -> Self {
        let short_url = link.short_url(base_url);

        Self {
            id: link.id,
            name: link.name,
            short_code: link.short_code,
            short_url,
            target_url: link.target_url,
            click_count: link.click_count,
            created_at: link.created_at,
        }
    }
}

/// Response for `GET /`.
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub base_url: String,
    pub links: Vec<LinkView>,
}
