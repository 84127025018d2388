use std::sync::Arc;

use cep_weather::adapters::LookupClient;
use cep_weather::app;
use cep_weather::app::gateway::{self, GatewayState};
use cep_weather::utils::{logger, validation::Validate};
use cep_weather::{GatewayConfig, Telemetry};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = GatewayConfig::parse();

    let telemetry = Arc::new(Telemetry::init(
        &config.service_name,
        config.otlp_endpoint.as_deref(),
    )?);
    logger::init_service_logger(config.verbose, Some(telemetry.layer()));

    tracing::info!("Starting gateway service");
    if config.verbose {
        tracing::debug!("Gateway config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let lookup = Arc::new(LookupClient::new(
        config.lookup_url.clone(),
        telemetry.clone(),
    )?);
    let router = gateway::router(GatewayState { lookup });

    let result = app::serve(router, config.listen_addr).await;
    telemetry.shutdown();
    result
}
