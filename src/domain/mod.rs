//! Domain layer containing business entities and logic.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`admission_gate`] - Per-client sliding-window rate limiter
//! - [`cleanup_worker`] - Periodic deletion of stale links
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])

pub mod admission_gate;
pub mod cleanup_worker;
pub mod entities;
pub mod repositories;
