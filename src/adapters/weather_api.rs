use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::ports::WeatherProvider;
use crate::utils::error::{ApiError, Result};

const WEATHER_TIMEOUT: Duration = Duration::from_secs(5);

/// Weather client for the WeatherAPI-shaped provider
/// (`GET /v1/current.json?key&q&aqi=no`).
pub struct WeatherApiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WeatherApiResponse {
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temp_c: f64,
}

impl WeatherApiClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let client = Client::builder().timeout(WEATHER_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiClient {
    #[tracing::instrument(name = "fetch_temperature", skip(self))]
    async fn current_celsius(&self, city: &str) -> Result<f64> {
        // A missing credential only surfaces once a request actually needs it.
        let key = self.api_key.as_deref().ok_or(ApiError::MissingWeatherKey)?;

        let url = format!("{}/v1/current.json", self.base_url);
        tracing::debug!("Requesting current conditions for {}", city);

        let response = self
            .client
            .get(&url)
            .query(&[("key", key), ("q", city), ("aqi", "no")])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::UpstreamStatus(response.status()));
        }

        let payload: WeatherApiResponse = response.json().await?;
        Ok(payload.current.temp_c)
    }
}
