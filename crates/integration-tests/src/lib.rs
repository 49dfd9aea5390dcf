//! Shared helpers for Repricer integration tests.
//!
//! Tests wire up the full chain: a wiremock server plays the platform's
//! Admin API, the real relay router is served on an ephemeral port, and the
//! client talks to the relay exactly as it would in production.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::expect_used)]

use secrecy::SecretString;
use url::Url;

use repricer_relay::{Relay, RelayConfig};

/// The access token the test relay injects upstream.
pub const TEST_ACCESS_TOKEN: &str = "shpat_integration_test_token";

/// Test relay configuration; the upstream endpoint is overridden per test.
#[must_use]
pub fn test_config() -> RelayConfig {
    RelayConfig {
        store_domain: "test.myshopify.com".to_string(),
        api_version: "2024-01".to_string(),
        access_token: SecretString::from(TEST_ACCESS_TOKEN),
        tls_verify: true,
        host: "127.0.0.1".parse().expect("loopback address parses"),
        port: 0,
    }
}

/// Serve the real relay router on an ephemeral port, forwarding to
/// `upstream`. Returns the relay's `/api/graphql` endpoint URL.
pub async fn spawn_relay(upstream: &str) -> Url {
    let upstream = Url::parse(&format!("{upstream}/admin/api/2024-01/graphql.json"))
        .expect("upstream URI should parse");
    let relay =
        Relay::with_endpoint(&test_config(), upstream).expect("relay construction should succeed");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral port should bind");
    let addr = listener.local_addr().expect("bound socket has an address");

    tokio::spawn(async move {
        axum::serve(listener, relay.router())
            .await
            .expect("relay server");
    });

    Url::parse(&format!("http://{addr}/api/graphql")).expect("relay endpoint URL parses")
}
