use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::model::CepLookup;
use crate::domain::ports::CepDirectory;
use crate::utils::error::{ApiError, Result};

const DIRECTORY_TIMEOUT: Duration = Duration::from_secs(5);

/// Directory client for the ViaCEP-shaped API (`GET /ws/{cep}/json/`).
pub struct ViaCepClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    localidade: Option<String>,
    #[serde(default)]
    erro: bool,
}

impl ViaCepClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(DIRECTORY_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CepDirectory for ViaCepClient {
    #[tracing::instrument(name = "resolve_location", skip(self))]
    async fn resolve(&self, cep: &str) -> Result<CepLookup> {
        let url = format!("{}/ws/{}/json/", self.base_url, cep);
        tracing::debug!("Requesting directory record from {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::UpstreamStatus(response.status()));
        }

        let record: ViaCepResponse = response.json().await?;
        if record.erro {
            return Ok(CepLookup::NotFound);
        }

        // A record without a usable city is the same not-found signal.
        match record.localidade {
            Some(city) if !city.is_empty() => Ok(CepLookup::Found(city)),
            _ => Ok(CepLookup::NotFound),
        }
    }
}
