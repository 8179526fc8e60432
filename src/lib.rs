//! CEP → weather pipeline, split across two chained HTTP services.
//!
//! ```text
//! caller
//!     → gateway (validate CEP, forward with trace context)
//!     → orchestrator (re-validate, CEP→city, city→°C, convert)
//!     → response relayed back unchanged through the gateway
//! ```
//!
//! The crate ships both services as binaries over one library: the
//! gateway gates malformed input and relays everything else verbatim,
//! the orchestrator runs the dependent lookups strictly in order, and a
//! W3C trace context links the hops into one exported trace.

// Domain
pub mod cep;
pub mod temperature;

// External collaborators
pub mod clients;

// HTTP surface
pub mod http;

// Cross-cutting concerns
pub mod config;
pub mod observability;

pub use cep::Cep;
pub use config::{GatewayConfig, OrchestratorConfig};
pub use http::{GatewayServer, OrchestratorServer};
