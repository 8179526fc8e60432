//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handlers and clients produce tracing spans
//!     → init.rs (fmt layer → stdout, OTel layer → OTLP collector)
//!
//! gateway → orchestrator hop
//!     → propagation.rs (W3C trace context in HTTP headers)
//! ```
//!
//! # Design Decisions
//! - The tracer provider is constructed explicitly at startup and
//!   handed back as a guard; nothing looks it up mid-request
//! - Span attributes record failures for observability; they never
//!   change the HTTP response shape

pub mod init;
pub mod propagation;

pub use init::{Telemetry, TelemetryError};
