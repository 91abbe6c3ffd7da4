//! Per-client admission control backed by [`AdmissionGate`].

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::domain::admission_gate::AdmissionGate;
use crate::error::AppError;
use crate::utils::client_ip::resolve_client_key;

/// Admits or rejects a request based on its client key.
///
/// The key comes from `X-Forwarded-For` (first hop), then `X-Real-IP`, then
/// the peer address.
///
/// # Errors
///
/// Returns `429 Too Many Requests` when the client exhausted its window.
///
/// # Example
///
/// ```rust,ignore
/// let limited = Router::new()
///     .route("/api/shorten", post(shorten_handler))
///     .layer(middleware::from_fn_with_state(gate.clone(), rate_limit::layer));
/// ```
pub async fn layer(
    State(gate): State<Arc<AdmissionGate>>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client_key = resolve_client_key(req.headers(), peer);

    if !gate.admit(&client_key, Instant::now()) {
        tracing::debug!(client = %client_key, path = %req.uri().path(), "Request rejected by rate limiter");
        metrics::counter!("shortli_admission_rejected_total").increment(1);

        return Err(AppError::too_many_requests(
            "Rate limit exceeded",
            json!({
                "limit": gate.limit(),
                "window_secs": gate.window().as_secs(),
            }),
        ));
    }

    Ok(next.run(req).await)
}
