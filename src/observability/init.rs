//! Tracing and trace-export bootstrap.
//!
//! Builds the OTLP gRPC span exporter and tracer provider explicitly at
//! process start and installs them as a `tracing_subscriber` layer next
//! to the usual fmt + `EnvFilter` pair. The returned [`Telemetry`]
//! guard owns the provider; dropping it without calling
//! [`Telemetry::shutdown`] loses buffered spans.
//!
//! The exporter connects lazily: an unreachable collector degrades to
//! dropped spans rather than refusing to start the service.

use opentelemetry::{global, trace::TracerProvider as _, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace::SdkTracerProvider, Resource};
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::TelemetryConfig;

/// Error type for telemetry initialization.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to build OTLP exporter: {0}")]
    Exporter(String),
}

/// Handle to the process-wide tracer provider.
pub struct Telemetry {
    provider: SdkTracerProvider,
}

impl Telemetry {
    /// Initialize tracing for a service.
    ///
    /// Sets the W3C trace-context propagator, builds the OTLP exporter
    /// and tracer provider, and installs the subscriber stack. Call
    /// once per process, before serving traffic.
    pub fn init(config: &TelemetryConfig) -> Result<Self, TelemetryError> {
        // W3C propagator carries the context across the service hop.
        global::set_text_map_propagator(TraceContextPropagator::new());

        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(config.endpoint.clone())
            .build()
            .map_err(|e| TelemetryError::Exporter(e.to_string()))?;

        let resource = Resource::builder_empty()
            .with_attributes([KeyValue::new("service.name", config.service_name.clone())])
            .build();

        let provider = SdkTracerProvider::builder()
            .with_batch_exporter(exporter)
            .with_resource(resource)
            .build();
        global::set_tracer_provider(provider.clone());

        let tracer = provider.tracer("cep-weather");

        tracing_subscriber::registry()
            .with(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "cep_weather=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer())
            .with(tracing_opentelemetry::OpenTelemetryLayer::new(tracer))
            .init();

        tracing::info!(
            endpoint = %config.endpoint,
            service_name = %config.service_name,
            "Telemetry initialized"
        );

        Ok(Self { provider })
    }

    /// Flush buffered spans and shut the provider down.
    pub fn shutdown(self) {
        if let Err(e) = self.provider.shutdown() {
            tracing::warn!(error = %e, "Tracer provider shutdown failed");
        }
    }
}
