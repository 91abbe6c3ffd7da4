//! Handler for link shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::qr_code::{qr_target, render_png_data_uri};

/// Creates (or returns the existing) short link for a URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "original_url": "example.com/a" }
/// ```
///
/// # Response
///
/// `201 Created` for a new link, `200 OK` when the normalized URL was
/// already shortened.
///
/// ```json
/// {
///   "original_url": "https://example.com/a",
///   "short_code": "1f0e3dad9990",
///   "short_url": "http://localhost:3000/1f0e3dad9990",
///   "qr_code_base64": "data:image/png;base64,iVBORw0KGgo..."
/// }
/// ```
///
/// The QR code encodes `short_url?src=qr`, so scans are counted separately.
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is missing or invalid.
/// Returns 500 Internal Server Error if no free code was found or the QR
/// code could not be rendered.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let allocation = state.link_service.shorten(&payload.original_url).await?;

    let status = if allocation.is_new {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    let short_url = state
        .link_service
        .short_url(&state.base_url, allocation.short_code());
    let qr_code_base64 = render_png_data_uri(&qr_target(&short_url))?;

    Ok((
        status,
        Json(ShortenResponse {
            original_url: allocation.link.original_url,
            short_code: allocation.link.short_code,
            short_url,
            qr_code_base64,
        }),
    ))
}
