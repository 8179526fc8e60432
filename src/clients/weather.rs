//! Current-temperature lookup against the weather provider.
//!
//! Contract consumed: `GET {base}/v1/current.json?key=&q=` returning
//! `{current: {temp_c}}`. The city name is percent-encoded into the
//! query by the HTTP client.

use http::StatusCode;
use serde::Deserialize;
use tracing::Instrument;

use crate::clients::UpstreamError;

/// Placeholder key used when no API key is configured.
pub const DEMO_API_KEY: &str = "demo";

/// Wire format of the provider response.
#[derive(Debug, Deserialize)]
struct WeatherApiResponse {
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temp_c: f64,
}

/// Client for the weather provider.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    /// Create a client on top of a shared HTTP client.
    ///
    /// A missing API key falls back to [`DEMO_API_KEY`]; callers are
    /// expected to have warned about this at startup.
    pub fn new(http: reqwest::Client, base_url: String, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url,
            api_key: api_key.unwrap_or_else(|| DEMO_API_KEY.to_string()),
        }
    }

    /// Fetch the current temperature for a city, in Celsius.
    pub async fn current_celsius(&self, city: &str) -> Result<f64, UpstreamError> {
        let span = tracing::info_span!(
            "fetch_weather",
            otel.kind = "client",
            weather.city = %city,
            temp.celsius = tracing::field::Empty,
            error.kind = tracing::field::Empty,
        );

        async {
            let result = self.fetch(city).await;
            match &result {
                Ok(celsius) => {
                    tracing::Span::current().record("temp.celsius", *celsius);
                }
                Err(e) => {
                    tracing::Span::current().record("error.kind", e.kind());
                    tracing::warn!(error = %e, "weather lookup failed");
                }
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn fetch(&self, city: &str) -> Result<f64, UpstreamError> {
        let url = format!("{}/v1/current.json", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("q", city)])
            .send()
            .await
            .map_err(UpstreamError::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(UpstreamError::Status(status));
        }

        let body: WeatherApiResponse = response.json().await.map_err(UpstreamError::Decode)?;
        if !body.current.temp_c.is_finite() {
            return Err(UpstreamError::NonFiniteReading);
        }

        Ok(body.current.temp_c)
    }
}
