use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use reqwest::Client;

use crate::domain::model::CepRequest;
use crate::utils::error::Result;
use crate::utils::telemetry::Telemetry;

const FORWARD_TIMEOUT: Duration = Duration::from_secs(10);

/// Raw downstream reply, relayed to the caller without reinterpretation.
#[derive(Debug, Clone)]
pub struct RelayedResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Gateway-side client for the lookup service.
pub struct LookupClient {
    client: Client,
    base_url: String,
    telemetry: Arc<Telemetry>,
}

impl LookupClient {
    pub fn new(base_url: impl Into<String>, telemetry: Arc<Telemetry>) -> Result<Self> {
        let client = Client::builder().timeout(FORWARD_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            telemetry,
        })
    }

    /// Single forwarding attempt. The trace context travels in the request
    /// headers so the lookup service continues the same trace.
    #[tracing::instrument(name = "forward_to_lookup", skip_all)]
    pub async fn forward(&self, request: &CepRequest) -> Result<RelayedResponse> {
        let mut headers = HeaderMap::new();
        self.telemetry
            .inject_context(&tracing::Span::current(), &mut headers);

        let response = self
            .client
            .post(format!("{}/weather", self.base_url))
            .headers(headers)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        Ok(RelayedResponse { status, body })
    }
}
