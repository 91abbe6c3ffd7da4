//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::code_allocator::CodeAllocator`] - Idempotent, collision-free short code allocation
//! - [`services::link_service::LinkService`] - Link creation, redirects, stats and deletion

pub mod services;
