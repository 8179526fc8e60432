//! HTTP surface of both services.
//!
//! # Data Flow
//! ```text
//! caller
//!     → gateway.rs  POST /cep-weather  (validate, forward, relay)
//!         → orchestrator.rs  POST /weather  (validate, resolve, fetch, convert)
//!             → clients/viacep.rs → clients/weather.rs
//! ```
//!
//! # Design Decisions
//! - Bodies are decoded by hand from bytes so malformed JSON maps to
//!   the pipeline's own 400 payload, not the framework's
//! - The gateway relays the orchestrator's status and body untouched;
//!   its own taxonomy ends once input validation has passed

pub mod gateway;
pub mod orchestrator;
pub mod types;

pub use gateway::GatewayServer;
pub use orchestrator::OrchestratorServer;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use types::ErrorBody;

/// Build one of the pipeline's fixed error responses.
pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}

/// Relay an upstream status and body byte-for-byte.
pub(crate) fn relay_response(
    status: StatusCode,
    content_type: Option<header::HeaderValue>,
    body: axum::body::Bytes,
) -> Response {
    let mut response = Response::new(axum::body::Body::from(body));
    *response.status_mut() = status;
    if let Some(ct) = content_type {
        response.headers_mut().insert(header::CONTENT_TYPE, ct);
    }
    response
}

/// Wait for shutdown signal (Ctrl+C).
pub(crate) async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
