use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;

use crate::adapters::lookup_client::{LookupClient, RelayedResponse};
use crate::domain::model::CepRequest;
use crate::utils::error::{ApiError, Result};
use crate::utils::validation::is_valid_cep;

#[derive(Clone)]
pub struct GatewayState {
    pub lookup: Arc<LookupClient>,
}

pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/cep", post(handle_cep))
        .with_state(state)
}

#[tracing::instrument(name = "handle_cep_request", skip_all)]
async fn handle_cep(State(state): State<GatewayState>, body: Bytes) -> Response {
    match forward_request(&state, &body).await {
        Ok(relayed) => relay(relayed),
        Err(err) => err.into_response(),
    }
}

async fn forward_request(state: &GatewayState, body: &[u8]) -> Result<RelayedResponse> {
    let request: CepRequest = serde_json::from_slice(body).map_err(ApiError::InvalidBody)?;
    if !is_valid_cep(&request.cep) {
        return Err(ApiError::InvalidZipcode);
    }
    state.lookup.forward(&request).await
}

/// Downstream status and body pass through untouched, error payloads included.
fn relay(relayed: RelayedResponse) -> Response {
    (
        relayed.status,
        [(header::CONTENT_TYPE, "application/json")],
        relayed.body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::telemetry::Telemetry;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use httpmock::prelude::*;
    use tower::ServiceExt;

    fn gateway_app(lookup_url: String) -> Router {
        let telemetry = Arc::new(Telemetry::init("gateway-test", None).unwrap());
        let lookup = Arc::new(LookupClient::new(lookup_url, telemetry).unwrap());
        router(GatewayState { lookup })
    }

    fn post_cep(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/cep")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_relays_downstream_success_verbatim() {
        let server = MockServer::start();
        let lookup_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/weather")
                .json_body(serde_json::json!({ "cep": "01001000" }));
            then.status(200).json_body(serde_json::json!({
                "city": "São Paulo", "temp_C": 25.0, "temp_F": 77.0, "temp_K": 298.0
            }));
        });

        let app = gateway_app(server.base_url());
        let response = app.oneshot(post_cep(r#"{"cep":"01001000"}"#)).await.unwrap();

        lookup_mock.assert();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["content-type"],
            "application/json"
        );
        let body = body_json(response).await;
        assert_eq!(body["city"], "São Paulo");
        assert_eq!(body["temp_K"], 298.0);
    }

    #[tokio::test]
    async fn test_relays_downstream_error_body_unchanged() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/weather");
            then.status(404)
                .json_body(serde_json::json!({ "message": "can not find zipcode" }));
        });

        let app = gateway_app(server.base_url());
        let response = app.oneshot(post_cep(r#"{"cep":"99999999"}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["message"], "can not find zipcode");
    }

    #[tokio::test]
    async fn test_invalid_zipcode_rejected_without_forwarding() {
        let server = MockServer::start();
        let lookup_mock = server.mock(|when, then| {
            when.method(POST).path("/weather");
            then.status(200);
        });

        let app = gateway_app(server.base_url());
        let response = app.oneshot(post_cep(r#"{"cep":"123"}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["message"], "invalid zipcode");
        lookup_mock.assert_hits(0);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let app = gateway_app("http://127.0.0.1:1".to_string());
        let response = app.oneshot(post_cep("{not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["message"], "invalid request body");
    }

    #[tokio::test]
    async fn test_unreachable_lookup_is_local_server_error() {
        let app = gateway_app("http://127.0.0.1:1".to_string());
        let response = app.oneshot(post_cep(r#"{"cep":"01001000"}"#)).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], "internal server error");
    }

    #[tokio::test]
    async fn test_non_post_method_is_rejected() {
        let app = gateway_app("http://127.0.0.1:1".to_string());
        let request = Request::builder()
            .method("GET")
            .uri("/cep")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
