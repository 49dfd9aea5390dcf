//! The pass-through forwarder and its router.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::config::RelayConfig;

/// Errors that can occur while constructing the relay.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The upstream endpoint URL could not be built.
    #[error("invalid upstream URL: {0}")]
    Url(#[from] url::ParseError),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// The single structured payload the relay accepts and forwards.
#[derive(Debug, Serialize, Deserialize)]
pub struct GraphQlRequest {
    /// A query or mutation document, forwarded verbatim.
    pub query: String,
}

/// The credential-injecting forwarder.
///
/// Cloning is cheap; all state is behind an `Arc`.
#[derive(Clone)]
pub struct Relay {
    inner: Arc<RelayInner>,
}

struct RelayInner {
    http: reqwest::Client,
    endpoint: Url,
    access_token: SecretString,
}

impl Relay {
    /// Create a relay pointed at the platform's Admin GraphQL endpoint for
    /// the configured store.
    ///
    /// # Errors
    ///
    /// Returns `RelayError` if the endpoint URL is invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: &RelayConfig) -> Result<Self, RelayError> {
        let endpoint = Url::parse(&format!(
            "https://{}/admin/api/{}/graphql.json",
            config.store_domain, config.api_version
        ))?;
        Self::with_endpoint(config, endpoint)
    }

    /// Create a relay with an explicit upstream endpoint (for testing
    /// against a mock server).
    ///
    /// # Errors
    ///
    /// Returns `RelayError` if the HTTP client cannot be built.
    pub fn with_endpoint(config: &RelayConfig, endpoint: Url) -> Result<Self, RelayError> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(!config.tls_verify)
            .build()?;

        Ok(Self {
            inner: Arc::new(RelayInner {
                http,
                endpoint,
                access_token: config.access_token.clone(),
            }),
        })
    }

    /// Build the relay router.
    #[must_use]
    pub fn router(self) -> Router {
        Router::new()
            .route("/api/graphql", post(forward))
            .with_state(self)
    }

    /// Forward one request to the platform.
    ///
    /// Success returns the upstream body unchanged with status 200; any
    /// failure returns the uniform 500 envelope.
    #[instrument(skip_all)]
    async fn forward(&self, request: GraphQlRequest) -> Response {
        let result = self
            .inner
            .http
            .post(self.inner.endpoint.clone())
            .header("X-Shopify-Access-Token", self.inner.access_token.expose_secret())
            .header(header::CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await;

        match result {
            Ok(upstream) if upstream.status().is_success() => match upstream.bytes().await {
                Ok(body) => (
                    StatusCode::OK,
                    [(header::CONTENT_TYPE, "application/json")],
                    body,
                )
                    .into_response(),
                Err(error) => {
                    tracing::error!(error = %error, "failed to read upstream body");
                    error_envelope(None, Value::String(error.to_string()))
                }
            },
            Ok(upstream) => {
                let status = upstream.status().as_u16();
                let body = upstream
                    .text()
                    .await
                    .unwrap_or_else(|error| error.to_string());
                tracing::error!(status, "upstream platform error");
                // Pass the upstream body through as JSON when it parses.
                let error = serde_json::from_str(&body).unwrap_or(Value::String(body));
                error_envelope(Some(status), error)
            }
            Err(error) => {
                tracing::error!(error = %error, "upstream request failed");
                let status = error.status().map(|status| status.as_u16());
                error_envelope(status, Value::String(error.to_string()))
            }
        }
    }
}

/// POST /api/graphql handler.
async fn forward(State(relay): State<Relay>, Json(request): Json<GraphQlRequest>) -> Response {
    relay.forward(request).await
}

/// The uniform failure envelope: HTTP 500 with `{ message, status, error }`.
fn error_envelope(status: Option<u16>, error: Value) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "message": "error forwarding request to the platform",
            "status": status,
            "error": error,
        })),
    )
        .into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn request_accepts_a_single_query_field() {
        let request: GraphQlRequest =
            serde_json::from_str(r#"{"query":"{ products { id } }"}"#).unwrap();
        assert_eq!(request.query, "{ products { id } }");
    }

    #[test]
    fn request_round_trips_the_document_verbatim() {
        let document = "mutation { update0: productVariantUpdate(input: { id: \"x\" }) { } }";
        let request = GraphQlRequest {
            query: document.to_string(),
        };
        let forwarded = serde_json::to_string(&request).unwrap();
        let back: GraphQlRequest = serde_json::from_str(&forwarded).unwrap();
        assert_eq!(back.query, document);
    }

    #[test]
    fn envelope_carries_upstream_status_and_error() {
        let response = error_envelope(Some(429), Value::String("Throttled".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
