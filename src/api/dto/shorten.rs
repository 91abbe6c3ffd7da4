//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
///
/// The scheme may be omitted (`example.com/a` is accepted); full validation
/// happens during normalization.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub original_url: String,
}

/// Shortened link returned by `POST /api/shorten`.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    /// PNG QR code of `short_url?src=qr` as a data URI.
    pub qr_code_base64: String,
}
