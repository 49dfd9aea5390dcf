//! Relay configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPIFY_STORE` - Platform store domain (e.g., your-store.myshopify.com)
//! - `SHOPIFY_ACCESS_TOKEN` - Admin API access token (server-held)
//!
//! ## Optional
//! - `SHOPIFY_API_VERSION` - API version (default: 2024-01)
//! - `RELAY_TLS_VERIFY` - Validate the upstream certificate (default: true)
//! - `RELAY_HOST` - Bind address (default: 127.0.0.1)
//! - `RELAY_PORT` - Listen port (default: 5000)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Relay configuration, passed explicitly at startup.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct RelayConfig {
    /// Platform store domain (e.g., your-store.myshopify.com)
    pub store_domain: String,
    /// Platform API version segment of the upstream URL
    pub api_version: String,
    /// Admin API access token, injected into every forwarded request
    pub access_token: SecretString,
    /// Whether to validate the upstream TLS certificate
    pub tls_verify: bool,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
}

impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("store_domain", &self.store_domain)
            .field("api_version", &self.api_version)
            .field("access_token", &"[REDACTED]")
            .field("tls_verify", &self.tls_verify)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl RelayConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let store_domain = get_required_env("SHOPIFY_STORE")?;
        let api_version = get_env_or_default("SHOPIFY_API_VERSION", "2024-01");
        let access_token = SecretString::from(get_required_env("SHOPIFY_ACCESS_TOKEN")?);
        let tls_verify = get_env_or_default("RELAY_TLS_VERIFY", "true")
            .parse::<bool>()
            .map_err(|e| ConfigError::InvalidEnvVar("RELAY_TLS_VERIFY".to_string(), e.to_string()))?;
        let host = get_env_or_default("RELAY_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("RELAY_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("RELAY_PORT", "5000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("RELAY_PORT".to_string(), e.to_string()))?;

        Ok(Self {
            store_domain,
            api_version,
            access_token,
            tls_verify,
            host,
            port,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
