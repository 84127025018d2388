use serde::{Deserialize, Serialize};

/// Inbound request body for both services: the postal code to resolve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CepRequest {
    pub cep: String,
}

/// Outcome of a directory lookup. Not-found is a value, not an error string,
/// so callers never have to match on message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CepLookup {
    Found(String),
    NotFound,
}

/// Aggregated result returned by the lookup service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    #[serde(rename = "temp_C")]
    pub temp_c: f64,
    #[serde(rename = "temp_F")]
    pub temp_f: f64,
    #[serde(rename = "temp_K")]
    pub temp_k: f64,
}

impl WeatherReport {
    pub fn from_celsius(city: String, temp_c: f64) -> Self {
        Self {
            city,
            temp_c,
            temp_f: celsius_to_fahrenheit(temp_c),
            temp_k: celsius_to_kelvin(temp_c),
        }
    }
}

/// The only error payload shape any caller ever sees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 1.8 + 32.0
}

/// Existing callers expect the 273 offset, not 273.15.
pub fn celsius_to_kelvin(c: f64) -> f64 {
    c + 273.0
}
