//! Repricer Relay - thin pass-through forwarder to the platform API.
//!
//! Accepts `POST /api/graphql` with a JSON body carrying a single `query`
//! string field, forwards it verbatim to the platform's Admin GraphQL
//! endpoint with the server-held access credential header, and returns the
//! platform's response unchanged. Any upstream failure is converted into a
//! uniform `{ message, status, error }` envelope with HTTP 500.
//!
//! No retry, no transformation, no caller authentication: the trust
//! boundary is the relay's deployment environment, not request-level.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod relay;

pub use config::{ConfigError, RelayConfig};
pub use relay::{Relay, RelayError};
