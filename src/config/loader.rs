//! Configuration loading from disk and environment.
//!
//! Loads an optional TOML file, applies environment overrides on top,
//! and runs semantic validation before handing the config to the
//! service.
//!
//! Recognized environment variables:
//! - `BIND_ADDRESS`: listener bind address (both services)
//! - `SERVICE_B_URL`: orchestrator base URL (gateway)
//! - `WEATHER_API_KEY`: weather provider key (orchestrator)
//! - `OTEL_EXPORTER_OTLP_ENDPOINT`: trace collector endpoint (both)

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::schema::{GatewayConfig, OrchestratorConfig};
use crate::config::validation::{validate_gateway, validate_orchestrator, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load gateway configuration: optional TOML file, env overrides,
/// then validation.
pub fn load_gateway_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let mut config: GatewayConfig = read_or_default(path)?;

    if let Ok(addr) = std::env::var("BIND_ADDRESS") {
        config.listener.bind_address = addr;
    }
    if let Ok(url) = std::env::var("SERVICE_B_URL") {
        config.orchestrator_url = url;
    }
    if let Ok(endpoint) = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT") {
        config.telemetry.endpoint = endpoint;
    }

    validate_gateway(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load orchestrator configuration: optional TOML file, env overrides,
/// then validation.
pub fn load_orchestrator_config(path: Option<&Path>) -> Result<OrchestratorConfig, ConfigError> {
    let mut config: OrchestratorConfig = read_or_default(path)?;

    if let Ok(addr) = std::env::var("BIND_ADDRESS") {
        config.listener.bind_address = addr;
    }
    if let Ok(key) = std::env::var("WEATHER_API_KEY") {
        config.weather_api_key = Some(key);
    }
    if let Ok(endpoint) = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT") {
        config.telemetry.endpoint = endpoint;
    }

    validate_orchestrator(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn read_or_default<T: DeserializeOwned + Default>(path: Option<&Path>) -> Result<T, ConfigError> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        }
        None => Ok(T::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config: GatewayConfig = read_or_default(None).unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.orchestrator_url, "http://service-b:8081");
    }

    #[test]
    fn partial_toml_keeps_defaults_for_the_rest() {
        let config: OrchestratorConfig = toml::from_str(
            r#"
            weather_api_key = "k"

            [upstream]
            request_timeout_secs = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.weather_api_key.as_deref(), Some("k"));
        assert_eq!(config.upstream.request_timeout_secs, 3);
        assert_eq!(config.viacep_url, "https://viacep.com.br");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8081");
    }

    #[test]
    fn garbage_toml_is_a_parse_error() {
        let err = toml::from_str::<GatewayConfig>("orchestrator_url = [").unwrap_err();
        let _ = ConfigError::Parse(err);
    }
}
