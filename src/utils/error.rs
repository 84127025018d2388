use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use thiserror::Error;

use crate::domain::model::ErrorBody;

/// Request-scoped error taxonomy. Display text is for logs; the message a
/// caller sees comes from `public_message` and never carries upstream detail.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid request body: {0}")]
    InvalidBody(#[source] serde_json::Error),

    #[error("invalid zipcode")]
    InvalidZipcode,

    #[error("can not find zipcode")]
    ZipcodeNotFound,

    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("upstream returned status {0}")]
    UpstreamStatus(StatusCode),

    #[error("weather api key is not configured")]
    MissingWeatherKey,

    #[error("invalid configuration for {field}: {reason}")]
    Config { field: String, reason: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::InvalidZipcode => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ZipcodeNotFound => StatusCode::NOT_FOUND,
            Self::Upstream(_)
            | Self::UpstreamStatus(_)
            | Self::MissingWeatherKey
            | Self::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidBody(_) => "invalid request body",
            Self::InvalidZipcode => "invalid zipcode",
            Self::ZipcodeNotFound => "can not find zipcode",
            Self::Upstream(_)
            | Self::UpstreamStatus(_)
            | Self::MissingWeatherKey
            | Self::Config { .. } => "internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            message: self.public_message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
