use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use http::StatusCode;
use tracing::Instrument;

use crate::domain::model::{CepLookup, CepRequest, WeatherReport};
use crate::domain::ports::{CepDirectory, WeatherProvider};
use crate::utils::error::{ApiError, Result};
use crate::utils::telemetry::Telemetry;
use crate::utils::validation::is_valid_cep;

#[derive(Clone)]
pub struct LookupState {
    pub directory: Arc<dyn CepDirectory>,
    pub weather: Arc<dyn WeatherProvider>,
    pub telemetry: Arc<Telemetry>,
}

pub fn router(state: LookupState) -> Router {
    Router::new()
        .route("/weather", post(handle_weather))
        .with_state(state)
}

async fn handle_weather(
    State(state): State<LookupState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    // Continue the caller's trace when a valid context arrives; otherwise
    // this span is the root of a fresh one.
    let span = tracing::info_span!("handle_weather_request", trace_id = tracing::field::Empty);
    state.telemetry.extract_context(&span, &headers);

    match lookup_weather(&state, &body).instrument(span).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn lookup_weather(state: &LookupState, body: &[u8]) -> Result<WeatherReport> {
    let request: CepRequest = serde_json::from_slice(body).map_err(ApiError::InvalidBody)?;
    if !is_valid_cep(&request.cep) {
        return Err(ApiError::InvalidZipcode);
    }

    let city = match state.directory.resolve(&request.cep).await? {
        CepLookup::Found(city) => city,
        CepLookup::NotFound => return Err(ApiError::ZipcodeNotFound),
    };

    let temp_c = state.weather.current_celsius(&city).await?;
    Ok(WeatherReport::from_celsius(city, temp_c))
}
