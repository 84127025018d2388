use std::net::SocketAddr;

use clap::Parser;

use crate::utils::error::Result;
use crate::utils::validation::{validate_url, Validate};

#[derive(Debug, Clone, Parser)]
#[command(name = "gateway")]
#[command(about = "Postal-code gateway: validates requests and forwards them to the lookup service")]
pub struct GatewayConfig {
    #[arg(long, default_value = "0.0.0.0:8080")]
    pub listen_addr: SocketAddr,

    #[arg(long, default_value = "http://localhost:8081")]
    pub lookup_url: String,

    #[arg(long, help = "OTLP/HTTP trace exporter endpoint")]
    pub otlp_endpoint: Option<String>,

    #[arg(long, default_value = "gateway")]
    pub service_name: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<()> {
        validate_url("lookup_url", &self.lookup_url)
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "lookup")]
#[command(about = "Weather lookup: resolves a postal code to a city and its current temperature")]
pub struct LookupConfig {
    #[arg(long, default_value = "0.0.0.0:8081")]
    pub listen_addr: SocketAddr,

    #[arg(long, default_value = "https://viacep.com.br")]
    pub directory_url: String,

    #[arg(long, default_value = "https://api.weatherapi.com")]
    pub weather_url: String,

    #[arg(long, help = "Weather provider API key")]
    pub weather_api_key: Option<String>,

    #[arg(long, help = "OTLP/HTTP trace exporter endpoint")]
    pub otlp_endpoint: Option<String>,

    #[arg(long, default_value = "lookup")]
    pub service_name: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for LookupConfig {
    fn validate(&self) -> Result<()> {
        validate_url("directory_url", &self.directory_url)?;
        validate_url("weather_url", &self.weather_url)
    }
}
