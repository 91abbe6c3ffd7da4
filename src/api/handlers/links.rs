//! Handler for link removal.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::delete::DeleteResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Deletes a short link and its counters.
///
/// # Endpoint
///
/// `DELETE /api/urls/{code}`
///
/// The code becomes free; shortening the same URL again yields the same code.
///
/// # Errors
///
/// Returns 404 Not Found if the link doesn't exist.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, AppError> {
    state.link_service.delete_link(&code).await?;

    tracing::info!(code = %code, "Link deleted");

    Ok(Json(DeleteResponse {
        status: "success",
        message: "URL deleted successfully",
        code,
    }))
}
