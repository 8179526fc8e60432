//! Postal code (CEP) validation.
//!
//! # Responsibilities
//! - Parse raw client input into a validated `Cep`
//! - Enforce the 8-ASCII-digit shape at every service boundary
//!
//! # Design Decisions
//! - `Cep` is a newtype: once constructed, the invariant always holds
//! - Trimming is the only normalization; hyphenated codes are rejected,
//!   not repaired
//! - Both services validate independently; the orchestrator never
//!   trusts the gateway

use std::fmt;

use thiserror::Error;

/// Raw input failed the CEP shape check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid zipcode: expected exactly 8 ASCII digits")]
pub struct InvalidCep;

/// A validated Brazilian postal code: exactly 8 ASCII decimal digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cep(String);

impl Cep {
    /// Parse raw input into a validated CEP.
    ///
    /// Leading/trailing whitespace is trimmed; the trimmed value must be
    /// exactly 8 ASCII digits. No sign, no separators, no unicode digits.
    pub fn parse(raw: &str) -> Result<Self, InvalidCep> {
        let trimmed = raw.trim();
        if trimmed.len() == 8 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(InvalidCep)
        }
    }

    /// The validated 8-digit code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
