pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod utils;

pub use config::{GatewayConfig, LookupConfig};
pub use utils::error::{ApiError, Result};
pub use utils::telemetry::Telemetry;
