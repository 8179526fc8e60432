//! Orchestrator (Service B) entry point.

use std::path::PathBuf;

use tokio::net::TcpListener;

use cep_weather::config::load_orchestrator_config;
use cep_weather::http::OrchestratorServer;
use cep_weather::observability::Telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = load_orchestrator_config(config_path.as_deref())?;

    let telemetry = Telemetry::init(&config.telemetry)?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        viacep_url = %config.viacep_url,
        weather_url = %config.weather_url,
        request_timeout_secs = config.upstream.request_timeout_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = OrchestratorServer::new(config)?;
    server.run(listener).await?;

    telemetry.shutdown();
    Ok(())
}
