//! Clients for the external lookup providers.
//!
//! # Data Flow
//! ```text
//! validated CEP
//!     → viacep.rs (CEP → city, or not-found)
//!     → weather.rs (city → current °C)
//! ```
//!
//! # Design Decisions
//! - One shared reqwest client per service, timeout baked in at build
//!   time; safe for concurrent dispatch across requests
//! - Transport errors, non-200 statuses and malformed bodies all
//!   collapse into `UpstreamError`; "zipcode unknown" is a distinct
//!   expected outcome, not an error
//! - Provider calls are recorded as client spans; trace headers are
//!   not forwarded to the providers

pub mod viacep;
pub mod weather;

use http::StatusCode;
use thiserror::Error;

pub use viacep::{CityResolution, ViaCepClient};
pub use weather::WeatherClient;

/// Errors that can occur while calling an external provider.
///
/// Every variant is terminal for the request; there are no retries.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The transport call itself failed (connect, timeout, aborted body).
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The provider answered with a non-200 status.
    #[error("unexpected status: {0}")]
    Status(StatusCode),

    /// The response body did not decode as the documented contract.
    #[error("malformed response body: {0}")]
    Decode(#[source] reqwest::Error),

    /// The provider reported a temperature that is not a finite number.
    #[error("non-finite temperature in provider response")]
    NonFiniteReading,
}

impl UpstreamError {
    /// Short tag recorded on spans as `error.kind`.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Transport(_) => "transport",
            UpstreamError::Status(_) => "status",
            UpstreamError::Decode(_) => "decode",
            UpstreamError::NonFiniteReading => "non_finite_reading",
        }
    }
}
