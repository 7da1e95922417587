//! Repository implementations.
//!
//! # Repositories
//!
//! - [`PgShortLinkRepository`] - PostgreSQL storage via SQLx
//! - [`MemoryShortLinkRepository`] - In-process storage for development and tests

pub mod memory_short_link_repository;
pub mod pg_short_link_repository;

pub use memory_short_link_repository::MemoryShortLinkRepository;
pub use pg_short_link_repository::PgShortLinkRepository;
