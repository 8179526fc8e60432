//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Once;

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tokio::net::TcpListener;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use cep_weather::{GatewayConfig, GatewayServer, OrchestratorConfig, OrchestratorServer};

static INIT: Once = Once::new();

/// Install a W3C propagator and an in-process tracer so spans carry
/// real, injectable trace contexts. No exporter: spans are dropped.
pub fn init_test_tracing() {
    INIT.call_once(|| {
        opentelemetry::global::set_text_map_propagator(TraceContextPropagator::new());
        let provider = SdkTracerProvider::builder().build();
        let tracer = provider.tracer("test");
        let _ = tracing_subscriber::registry()
            .with(tracing_opentelemetry::OpenTelemetryLayer::new(tracer))
            .try_init();
    });
}

/// Spawn the gateway on an ephemeral port.
#[allow(dead_code)]
pub async fn spawn_gateway(config: GatewayConfig) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = GatewayServer::new(config).unwrap();
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });
    addr
}

/// Spawn the orchestrator on an ephemeral port.
#[allow(dead_code)]
pub async fn spawn_orchestrator(config: OrchestratorConfig) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = OrchestratorServer::new(config).unwrap();
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });
    addr
}

/// A base URL nothing listens on, for unreachable-upstream scenarios.
pub fn unreachable_url() -> String {
    "http://127.0.0.1:1".to_string()
}
