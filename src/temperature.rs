//! Temperature unit conversion.
//!
//! # Design Decisions
//! - Pure and infallible: every finite Celsius reading converts
//! - Kelvin uses the +273 offset the upstream contract pins, not the
//!   physical 273.15

/// Kelvin offset pinned by the response contract.
const KELVIN_OFFSET: f64 = 273.0;

/// A Celsius reading converted to all three reported scales.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    pub celsius: f64,
    pub fahrenheit: f64,
    pub kelvin: f64,
}

impl Conversion {
    /// Derive Fahrenheit and Kelvin from a Celsius reading.
    pub fn from_celsius(celsius: f64) -> Self {
        Self {
            celsius,
            fahrenheit: celsius * 1.8 + 32.0,
            kelvin: celsius + KELVIN_OFFSET,
        }
    }
}
