//! Configuration schema definitions.
//!
//! One config type per service, sharing the common sections. All types
//! derive Serde traits for deserialization from config files, and every
//! section has a `Default` so a minimal (or absent) file is enough to
//! start a service.

use serde::{Deserialize, Serialize};

/// Configuration for the gateway (Service A).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Base URL of the orchestrator (Service B).
    pub orchestrator_url: String,

    /// Outbound call settings.
    pub upstream: UpstreamConfig,

    /// Trace export settings.
    pub telemetry: TelemetryConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig {
                bind_address: "0.0.0.0:8080".to_string(),
            },
            orchestrator_url: "http://service-b:8081".to_string(),
            upstream: UpstreamConfig::default(),
            telemetry: TelemetryConfig {
                service_name: "gateway".to_string(),
                ..TelemetryConfig::default()
            },
        }
    }
}

/// Configuration for the orchestrator (Service B).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Base URL of the postal-code provider.
    pub viacep_url: String,

    /// Base URL of the weather provider.
    pub weather_url: String,

    /// Weather provider API key. When unset, the client falls back to
    /// the provider's `demo` placeholder key and logs a warning at
    /// startup.
    pub weather_api_key: Option<String>,

    /// Outbound call settings.
    pub upstream: UpstreamConfig,

    /// Trace export settings.
    pub telemetry: TelemetryConfig,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig {
                bind_address: "0.0.0.0:8081".to_string(),
            },
            viacep_url: "https://viacep.com.br".to_string(),
            weather_url: "http://api.weatherapi.com".to_string(),
            weather_api_key: None,
            upstream: UpstreamConfig::default(),
            telemetry: TelemetryConfig {
                service_name: "orchestrator".to_string(),
                ..TelemetryConfig::default()
            },
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

/// Settings applied to every outbound HTTP call.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Deadline per outbound call in seconds. Covers connect, send and
    /// body read; an expired deadline surfaces as an upstream failure.
    pub request_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 10,
        }
    }
}

/// Trace export settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// OTLP gRPC endpoint of the trace collector.
    pub endpoint: String,

    /// Service name recorded on every exported span.
    pub service_name: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://otel-collector:4317".to_string(),
            service_name: "cep-weather".to_string(),
        }
    }
}
