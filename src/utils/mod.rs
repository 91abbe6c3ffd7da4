//! Utility functions for code generation, URL processing, and request handling.
//!
//! - [`code_generator`] - Content-derived short code candidates
//! - [`url_normalizer`] - URL validation and normalization
//! - [`client_ip`] - Client identity resolution from HTTP headers
//! - [`qr_code`] - PNG QR codes for short links

pub mod client_ip;
pub mod code_generator;
pub mod qr_code;
pub mod url_normalizer;
