//! Core domain entities.
//!
//! The service has a single persistent entity, [`ShortLink`]. Creation input
//! is modelled separately as [`NewShortLink`] since `id`, `click_count` and
//! `created_at` are assigned by the store.

pub mod short_link;

pub use short_link::{NewShortLink, ShortLink};
