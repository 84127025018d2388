// Adapters layer: concrete clients for the external systems the pipelines
// talk to (postal-code directory, weather provider, the lookup service).

pub mod lookup_client;
pub mod viacep;
pub mod weather_api;

pub use lookup_client::{LookupClient, RelayedResponse};
pub use viacep::ViaCepClient;
pub use weather_api::WeatherApiClient;
