//! City lookup against the ViaCEP postal-code provider.
//!
//! Contract consumed: `GET {base}/ws/{cep}/json/` returning
//! `{cep, localidade, erro}`, where a non-empty `erro` signals that the
//! code does not exist.

use http::StatusCode;
use serde::Deserialize;
use tracing::Instrument;

use crate::cep::Cep;
use crate::clients::UpstreamError;

/// Outcome of a successful round trip to the provider.
///
/// "Zipcode unknown" is an expected answer with its own status mapping,
/// kept apart from transport-level failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CityResolution {
    /// The provider resolved the code to this city. An empty name is
    /// passed through as-is.
    Found(String),

    /// The provider knows the code shape but no such code exists.
    NotFound,
}

/// Wire format of the provider response.
#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    erro: String,
}

/// Client for the postal-code provider.
#[derive(Debug, Clone)]
pub struct ViaCepClient {
    http: reqwest::Client,
    base_url: String,
}

impl ViaCepClient {
    /// Create a client on top of a shared HTTP client.
    pub fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    /// Resolve a validated CEP to a city name.
    pub async fn resolve(&self, cep: &Cep) -> Result<CityResolution, UpstreamError> {
        let url = format!("{}/ws/{}/json/", self.base_url, cep);
        let span = tracing::info_span!(
            "resolve_city",
            otel.kind = "client",
            http.url = %url,
            city.found = tracing::field::Empty,
            error.kind = tracing::field::Empty,
        );

        async {
            let result = self.fetch(&url).await;
            match &result {
                Ok(CityResolution::Found(city)) => {
                    tracing::Span::current().record("city.found", true);
                    tracing::debug!(city = %city, "CEP resolved");
                }
                Ok(CityResolution::NotFound) => {
                    tracing::Span::current().record("city.found", false);
                }
                Err(e) => {
                    tracing::Span::current().record("error.kind", e.kind());
                    tracing::warn!(error = %e, "city lookup failed");
                }
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn fetch(&self, url: &str) -> Result<CityResolution, UpstreamError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(UpstreamError::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(UpstreamError::Status(status));
        }

        let body: ViaCepResponse = response.json().await.map_err(UpstreamError::Decode)?;
        if !body.erro.is_empty() {
            return Ok(CityResolution::NotFound);
        }

        Ok(CityResolution::Found(body.localidade))
    }
}
