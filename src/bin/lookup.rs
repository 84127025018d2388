use std::sync::Arc;

use cep_weather::adapters::{ViaCepClient, WeatherApiClient};
use cep_weather::app;
use cep_weather::app::lookup::{self, LookupState};
use cep_weather::utils::{logger, validation::Validate};
use cep_weather::{LookupConfig, Telemetry};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = LookupConfig::parse();

    let telemetry = Arc::new(Telemetry::init(
        &config.service_name,
        config.otlp_endpoint.as_deref(),
    )?);
    logger::init_service_logger(config.verbose, Some(telemetry.layer()));

    tracing::info!("Starting lookup service");
    if config.verbose {
        tracing::debug!("Lookup config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    if config.weather_api_key.is_none() {
        tracing::warn!("No weather API key configured; weather calls will fail");
    }

    let directory = Arc::new(ViaCepClient::new(config.directory_url.clone())?);
    let weather = Arc::new(WeatherApiClient::new(
        config.weather_url.clone(),
        config.weather_api_key.clone(),
    )?);
    let router = lookup::router(LookupState {
        directory,
        weather,
        telemetry: telemetry.clone(),
    });

    let result = app::serve(router, config.listen_addr).await;
    telemetry.shutdown();
    result
}
