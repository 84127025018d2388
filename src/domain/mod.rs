// Domain layer: core models and ports (interfaces). No HTTP or provider details here.

pub mod model;
pub mod ports;

pub use model::{CepLookup, CepRequest, ErrorBody, WeatherReport};
pub use ports::{CepDirectory, WeatherProvider};
