use serde::Serialize;

/// Confirmation returned by `DELETE /api/urls/{code}`.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub code: String,
}
