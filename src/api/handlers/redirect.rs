//! Handler for short URL redirect.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::domain::entities::ClickSource;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::is_well_formed_code;

#[derive(Debug, Default, Deserialize)]
pub struct RedirectParams {
    pub src: Option<String>,
}

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// `?src=qr` counts the click as a QR code scan.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    Query(params): Query<RedirectParams>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    if !is_well_formed_code(&code) {
        return Err(AppError::not_found("URL not found", json!({ "code": code })));
    }

    let source = ClickSource::from_query(params.src.as_deref());
    let link = state.link_service.resolve(&code, source).await?;

    debug!(code = %link.short_code, ?source, "Redirecting");

    Ok(Redirect::temporary(&link.original_url))
}
