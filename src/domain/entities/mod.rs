//! Core domain entities.
//!
//! Entities follow the "New Type" pattern with a separate struct for creation:
//! [`ShortLink`] is a persisted record, [`NewShortLink`] is the insert payload.

pub mod link;

pub use link::{ClickSource, NewShortLink, ShortLink};
