//! Pagination query parameters.

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, DisplayFromStr, serde_as};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// Pagination query parameters.
///
/// Uses `serde_with` to parse numbers from query strings. Values that are not
/// numbers are treated as absent and fall back to the defaults.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    #[serde(default)]
    pub page: Option<i64>,

    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Effective page window after defaults and clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u32,
    pub limit: u32,
}

impl PageWindow {
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }

    pub fn total_pages(&self, total: i64) -> u32 {
        if total <= 0 {
            return 0;
        }
        let limit = i64::from(self.limit);
        u32::try_from((total + limit - 1) / limit).unwrap_or(u32::MAX)
    }
}

impl PaginationParams {
    /// Resolves the page window.
    ///
    /// # Defaults
    ///
    /// - `page`: 1; values below 1 become 1
    /// - `limit`: 10; values outside `1..=100` become 10
    pub fn window(&self) -> PageWindow {
        let page = match self.page {
            Some(p) if p >= 1 => u32::try_from(p).unwrap_or(u32::MAX),
            _ => DEFAULT_PAGE,
        };

        let limit = match self.limit {
            Some(l) if (1..=i64::from(MAX_LIMIT)).contains(&l) => l as u32,
            _ => DEFAULT_LIMIT,
        };

        PageWindow { page, limit }
    }
}

/// Pagination metadata for list responses.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}
