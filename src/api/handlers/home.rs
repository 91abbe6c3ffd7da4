use axum::Json;

use crate::api::dto::home::HomeResponse;

/// `GET /`
pub async fn home_handler() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: "URL Shortener API",
        version: env!("CARGO_PKG_VERSION"),
    })
}
