//! Handlers for link statistics.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::dto::pagination::{PaginationMeta, PaginationParams};
use crate::api::dto::stats::{StatsListResponse, UrlStatsResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Retrieves click statistics for a specific short link.
///
/// # Endpoint
///
/// `GET /api/stats/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<UrlStatsResponse>, AppError> {
    let link = state.link_service.get_link(&code).await?;
    let short_url = state.link_service.short_url(&state.base_url, &link.short_code);

    Ok(Json(UrlStatsResponse::from_link(link, short_url)))
}

/// Lists statistics for all links, newest first.
///
/// # Endpoint
///
/// `GET /api/stats`
///
/// # Query Parameters
///
/// - `page` (optional): Page number (default: 1)
/// - `limit` (optional): Items per page (default: 10, max: 100)
///
/// Uses `tokio::try_join!` to run the page query and the total count together.
pub async fn stats_list_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<StatsListResponse>, AppError> {
    let window = params.window();

    let (links, total) = state
        .link_service
        .list_links(i64::from(window.limit), window.offset())
        .await?;

    let data = links
        .into_iter()
        .map(|link| {
            let short_url = state.link_service.short_url(&state.base_url, &link.short_code);
            UrlStatsResponse::from_link(link, short_url)
        })
        .collect();

    Ok(Json(StatsListResponse {
        data,
        meta: PaginationMeta {
            total,
            page: window.page,
            limit: window.limit,
            total_pages: window.total_pages(total),
        },
    }))
}
