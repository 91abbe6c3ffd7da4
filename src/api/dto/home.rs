use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub message: &'static str,
    pub version: &'static str,
}
