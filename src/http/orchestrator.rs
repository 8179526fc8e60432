//! Orchestrator (Service B) HTTP server.
//!
//! # Responsibilities
//! - Re-validate the postal code (the gateway is not trusted)
//! - Resolve CEP → city, then city → temperature, strictly in order
//! - Convert the reading and assemble the final payload
//! - Map every failure at every step to its own status/body pair
//!
//! # Status mapping
//! - 400 `invalid request body`: body is not the documented JSON
//! - 422 `invalid zipcode`: postal code fails the shape check
//! - 404 `can not find zipcode`: provider reports no such code
//! - 500 `internal server error during city lookup` / `... weather
//!   lookup`: upstream failure at the respective step
//! - 200 `{city, temp_C, temp_F, temp_K}`: all steps succeeded

use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::Instrument;

use crate::cep::Cep;
use crate::clients::{CityResolution, ViaCepClient, WeatherClient};
use crate::config::OrchestratorConfig;
use crate::http::types::{CepRequest, WeatherResponse};
use crate::http::{error_response, shutdown_signal};
use crate::observability::propagation;
use crate::temperature::Conversion;

/// Application state injected into the handler.
#[derive(Clone)]
struct OrchestratorState {
    viacep: ViaCepClient,
    weather: WeatherClient,
}

/// HTTP server for the orchestrator.
pub struct OrchestratorServer {
    router: Router,
}

impl OrchestratorServer {
    /// Create the server: one shared outbound HTTP client with the
    /// configured per-call deadline, wrapped by the two provider
    /// clients.
    pub fn new(config: OrchestratorConfig) -> Result<Self, reqwest::Error> {
        if config.weather_api_key.is_none() {
            tracing::warn!(
                "WEATHER_API_KEY not configured, falling back to the demo placeholder key"
            );
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream.request_timeout_secs))
            .build()?;

        let state = OrchestratorState {
            viacep: ViaCepClient::new(http.clone(), config.viacep_url.clone()),
            weather: WeatherClient::new(
                http,
                config.weather_url.clone(),
                config.weather_api_key.clone(),
            ),
        };

        let router = Router::new()
            .route("/weather", post(weather_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http());

        Ok(Self { router })
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        tracing::info!(address = %listener.local_addr()?, "Orchestrator listening");
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        tracing::info!("Orchestrator stopped");
        Ok(())
    }
}

/// `POST /weather`: the full lookup pipeline, one pass, no retries.
async fn weather_handler(
    State(state): State<OrchestratorState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let span = tracing::info_span!(
        "handle_weather",
        otel.kind = "server",
        http.route = "/weather",
        trace_id = tracing::field::Empty,
        cep.value = tracing::field::Empty,
        error.kind = tracing::field::Empty,
    );
    // Continue the trace the gateway started.
    propagation::set_parent_from_headers(&span, &headers);

    async move {
        let request: CepRequest = match serde_json::from_slice(&body) {
            Ok(request) => request,
            Err(e) => {
                tracing::Span::current().record("error.kind", "decode_error");
                tracing::debug!(error = %e, "Request body did not decode");
                return error_response(StatusCode::BAD_REQUEST, "invalid request body");
            }
        };

        let cep = match Cep::parse(&request.cep) {
            Ok(cep) => cep,
            Err(_) => {
                tracing::Span::current().record("error.kind", "validation_error");
                return error_response(StatusCode::UNPROCESSABLE_ENTITY, "invalid zipcode");
            }
        };
        tracing::Span::current().record("cep.value", cep.as_str());

        let city = match state.viacep.resolve(&cep).await {
            Ok(CityResolution::Found(city)) => city,
            Ok(CityResolution::NotFound) => {
                tracing::Span::current().record("error.kind", "not_found");
                return error_response(StatusCode::NOT_FOUND, "can not find zipcode");
            }
            Err(e) => {
                tracing::Span::current().record("error.kind", "city_lookup_error");
                tracing::error!(error = %e, "City lookup failed");
                return error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error during city lookup",
                );
            }
        };

        let celsius = match state.weather.current_celsius(&city).await {
            Ok(celsius) => celsius,
            Err(e) => {
                tracing::Span::current().record("error.kind", "weather_lookup_error");
                tracing::error!(error = %e, "Weather lookup failed");
                return error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error during weather lookup",
                );
            }
        };

        let converted = {
            let _span = tracing::info_span!("temperature_conversion").entered();
            Conversion::from_celsius(celsius)
        };

        let payload = WeatherResponse {
            city,
            temp_c: converted.celsius,
            temp_f: converted.fahrenheit,
            temp_k: converted.kelvin,
        };
        (StatusCode::OK, Json(payload)).into_response()
    }
    .instrument(span)
    .await
}
