use crate::domain::model::CepLookup;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Maps a postal code to a city record.
#[async_trait]
pub trait CepDirectory: Send + Sync {
    async fn resolve(&self, cep: &str) -> Result<CepLookup>;
}

/// Returns the current temperature in Celsius for a named city.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_celsius(&self, city: &str) -> Result<f64>;
}
