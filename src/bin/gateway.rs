//! Gateway (Service A) entry point.

use std::path::PathBuf;

use tokio::net::TcpListener;

use cep_weather::config::load_gateway_config;
use cep_weather::http::GatewayServer;
use cep_weather::observability::Telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = load_gateway_config(config_path.as_deref())?;

    let telemetry = Telemetry::init(&config.telemetry)?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        orchestrator_url = %config.orchestrator_url,
        request_timeout_secs = config.upstream.request_timeout_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = GatewayServer::new(config)?;
    server.run(listener).await?;

    telemetry.shutdown();
    Ok(())
}
