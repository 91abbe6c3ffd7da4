//! DTOs for link statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::dto::pagination::PaginationMeta;
use crate::domain::entities::ShortLink;

/// Statistics for a single link.
#[derive(Debug, Serialize)]
pub struct UrlStatsResponse {
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub click_count: i64,
    pub qr_click_count: i64,
    pub total_clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl UrlStatsResponse {
    pub fn from_link(link: ShortLink, short_url: String) -> Self {
        let total_clicks = link.total_clicks();
        Self {
            original_url: link.original_url,
            short_code: link.short_code,
            short_url,
            click_count: link.click_count,
            qr_click_count: link.qr_click_count,
            total_clicks,
            created_at: link.created_at,
        }
    }
}

/// Paginated list of link statistics.
#[derive(Debug, Serialize)]
pub struct StatsListResponse {
    pub data: Vec<UrlStatsResponse>,
    pub meta: PaginationMeta,
}
