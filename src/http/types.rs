//! Wire types shared by both services.

use serde::{Deserialize, Serialize};

/// Inbound request body for both services: `{"cep": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CepRequest {
    pub cep: String,
}

/// Final success payload of the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub city: String,
    #[serde(rename = "temp_C")]
    pub temp_c: f64,
    #[serde(rename = "temp_F")]
    pub temp_f: f64,
    #[serde(rename = "temp_K")]
    pub temp_k: f64,
}

/// Error payload: `{"message": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
