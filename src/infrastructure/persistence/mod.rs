//! Link repository implementations.
//!
//! - [`PgLinkRepository`] - PostgreSQL storage backed by the `url_info` table
//! - [`InMemoryLinkRepository`] - process-local storage with the same uniqueness rules

pub mod memory_link_repository;
pub mod pg_link_repository;

pub use memory_link_repository::InMemoryLinkRepository;
pub use pg_link_repository::PgLinkRepository;
