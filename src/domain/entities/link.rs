//! Short link entity representing a URL-to-code mapping.

use chrono::{DateTime, Utc};

/// A shortened URL with its click counters.
///
/// `short_code` is unique across all records and `original_url` maps to at
/// most one record. Counters only ever grow and are touched by the redirect
/// path alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub click_count: i64,
    pub qr_click_count: i64,
    pub created_at: DateTime<Utc>,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(
        id: i64,
        original_url: String,
        short_code: String,
        click_count: i64,
        qr_click_count: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            original_url,
            short_code,
            click_count,
            qr_click_count,
            created_at,
        }
    }

    /// Clicks from every source combined.
    pub fn total_clicks(&self) -> i64 {
        self.click_count + self.qr_click_count
    }
}

/// Input data for inserting a new short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub original_url: String,
    pub short_code: String,
}

/// Where a redirect originated, selecting which counter is incremented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickSource {
    #[default]
    Direct,
    QrCode,
}

impl ClickSource {
    /// Maps the optional `src` query parameter of a redirect.
    ///
    /// Only `qr` (case-insensitive) selects [`ClickSource::QrCode`]; anything
    /// else counts as a direct click.
    pub fn from_query(src: Option<&str>) -> Self {
        match src {
            Some(s) if s.eq_ignore_ascii_case("qr") => Self::QrCode,
            _ => Self::Direct,
        }
    }
}
