//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check upstream base URLs actually parse
//! - Validate value ranges (timeouts > 0, bind address well-formed)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function over the config
//! - Runs before a config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::{GatewayConfig, ListenerConfig, OrchestratorConfig, UpstreamConfig};

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A field that must hold a URL does not parse as one.
    #[error("{field}: '{value}' is not a valid URL")]
    InvalidUrl { field: &'static str, value: String },

    /// The listener bind address does not parse as host:port.
    #[error("listener.bind_address: '{0}' is not a valid socket address")]
    InvalidBindAddress(String),

    /// A duration that must be positive is zero.
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

/// Validate gateway configuration, collecting every problem.
pub fn validate_gateway(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    check_listener(&config.listener, &mut errors);
    check_upstream(&config.upstream, &mut errors);
    check_url("orchestrator_url", &config.orchestrator_url, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate orchestrator configuration, collecting every problem.
pub fn validate_orchestrator(config: &OrchestratorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    check_listener(&config.listener, &mut errors);
    check_upstream(&config.upstream, &mut errors);
    check_url("viacep_url", &config.viacep_url, &mut errors);
    check_url("weather_url", &config.weather_url, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_listener(listener: &ListenerConfig, errors: &mut Vec<ValidationError>) {
    if listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            listener.bind_address.clone(),
        ));
    }
}

fn check_upstream(upstream: &UpstreamConfig, errors: &mut Vec<ValidationError>) {
    if upstream.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroDuration("upstream.request_timeout_secs"));
    }
}

fn check_url(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if Url::parse(value).is_err() {
        errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configs_validate() {
        assert_eq!(validate_gateway(&GatewayConfig::default()), Ok(()));
        assert_eq!(validate_orchestrator(&OrchestratorConfig::default()), Ok(()));
    }

    #[test]
    fn collects_all_errors_at_once() {
        let mut config = OrchestratorConfig::default();
        config.listener.bind_address = "nowhere".to_string();
        config.viacep_url = "not a url".to_string();
        config.upstream.request_timeout_secs = 0;

        let errors = validate_orchestrator(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn rejects_bad_orchestrator_url() {
        let config = GatewayConfig {
            orchestrator_url: "http://".to_string(),
            ..GatewayConfig::default()
        };
        let errors = validate_gateway(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidUrl { .. }));
    }
}
