//! Gateway (Service A) HTTP server.
//!
//! # Responsibilities
//! - Gate malformed input before it reaches the orchestrator
//! - Forward the *trimmed* validated code, never the raw body
//! - Inject the trace context into the outbound hop
//! - Relay the orchestrator's status and body byte-for-byte
//!
//! # Design Decisions
//! - The gateway never reinterprets orchestrator errors; its own
//!   taxonomy covers only decode (400), validation (422) and the
//!   orchestrator being unreachable (500)

use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::Response;
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::Instrument;

use crate::cep::Cep;
use crate::config::GatewayConfig;
use crate::http::types::CepRequest;
use crate::http::{error_response, relay_response, shutdown_signal};
use crate::observability::propagation;

/// Application state injected into the handler.
#[derive(Clone)]
struct GatewayState {
    http: reqwest::Client,
    /// Fully-formed `POST /weather` endpoint of the orchestrator.
    weather_endpoint: String,
}

/// HTTP server for the gateway.
pub struct GatewayServer {
    router: Router,
}

impl GatewayServer {
    /// Create the server with a shared outbound HTTP client carrying
    /// the configured per-call deadline.
    pub fn new(config: GatewayConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream.request_timeout_secs))
            .build()?;

        let state = GatewayState {
            http,
            weather_endpoint: format!(
                "{}/weather",
                config.orchestrator_url.trim_end_matches('/')
            ),
        };

        let router = Router::new()
            .route("/cep-weather", post(cep_weather_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http());

        Ok(Self { router })
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        tracing::info!(address = %listener.local_addr()?, "Gateway listening");
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        tracing::info!("Gateway stopped");
        Ok(())
    }
}

/// `POST /cep-weather`: validate, forward, relay.
async fn cep_weather_handler(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let span = tracing::info_span!(
        "handle_cep_weather",
        otel.kind = "server",
        http.route = "/cep-weather",
        trace_id = tracing::field::Empty,
        cep.value = tracing::field::Empty,
        cep.valid = tracing::field::Empty,
    );
    propagation::set_parent_from_headers(&span, &headers);

    async move {
        let request: CepRequest = match serde_json::from_slice(&body) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!(error = %e, "Request body did not decode");
                return error_response(StatusCode::BAD_REQUEST, "invalid request body");
            }
        };

        let cep = match Cep::parse(&request.cep) {
            Ok(cep) => cep,
            Err(_) => {
                tracing::Span::current().record("cep.valid", false);
                return error_response(StatusCode::UNPROCESSABLE_ENTITY, "invalid zipcode");
            }
        };
        tracing::Span::current().record("cep.valid", true);
        tracing::Span::current().record("cep.value", cep.as_str());

        forward_to_orchestrator(&state, &cep).await
    }
    .instrument(span)
    .await
}

/// One hop to the orchestrator with the trace context in the headers.
/// Anything it answers is relayed untouched.
async fn forward_to_orchestrator(state: &GatewayState, cep: &Cep) -> Response {
    let span = tracing::info_span!(
        "call_orchestrator",
        otel.kind = "client",
        http.url = %state.weather_endpoint,
        http.status_code = tracing::field::Empty,
    );

    async {
        let mut outbound_headers = HeaderMap::new();
        propagation::inject_context(&tracing::Span::current(), &mut outbound_headers);

        // Fresh body holding only the validated, trimmed code.
        let outbound = CepRequest {
            cep: cep.as_str().to_string(),
        };

        let response = match state
            .http
            .post(&state.weather_endpoint)
            .headers(outbound_headers)
            .json(&outbound)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "Orchestrator unreachable");
                return error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "could not connect to service B",
                );
            }
        };

        let status = response.status();
        tracing::Span::current().record("http.status_code", status.as_u16());
        if status != StatusCode::OK {
            tracing::warn!(status = %status, "Orchestrator returned an error, relaying");
        }

        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        match response.bytes().await {
            Ok(bytes) => relay_response(status, content_type, bytes),
            Err(e) => {
                tracing::error!(error = %e, "Orchestrator response body aborted");
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "could not connect to service B",
                )
            }
        }
    }
    .instrument(span)
    .await
}
