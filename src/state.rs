use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::admission_gate::AdmissionGate;

/// Shared state handed to every handler and middleware.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub admission: Arc<AdmissionGate>,
    /// Public prefix for rendered short URLs.
    pub base_url: String,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService>,
        admission: Arc<AdmissionGate>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            link_service,
            admission,
            base_url: base_url.into(),
        }
    }
}
