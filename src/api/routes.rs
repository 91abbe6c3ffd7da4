//! API route configuration.

use crate::api::handlers::{delete_link_handler, shorten_handler, stats_handler, stats_list_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// REST API routes, nested under `/api`.
///
/// # Endpoints
///
/// - `POST   /shorten`        - Create or look up a short link
/// - `GET    /stats`          - Paginated statistics for all links
/// - `GET    /stats/{code}`   - Statistics for a specific link
/// - `DELETE /urls/{code}`    - Delete a link
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/stats", get(stats_list_handler))
        .route("/stats/{code}", get(stats_handler))
        .route("/urls/{code}", delete(delete_link_handler))
}
