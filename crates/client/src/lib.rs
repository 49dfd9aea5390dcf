//! Repricer client - catalog fetching and price editing over the relay.
//!
//! Two components, client-driven:
//!
//! - [`CatalogClient`] retrieves the full product/variant catalog from the
//!   platform via cursor-based pagination and normalizes it into the local
//!   data model.
//! - [`EditSession`] holds in-memory price edits keyed by product id,
//!   formats/parses currency, and on commit submits one batched mutation
//!   with one sub-mutation per variant in a single round trip.
//!
//! Both talk to the relay endpoint, which injects the platform credential;
//! no credential ever lives in this crate.
//!
//! # Example
//!
//! ```rust,ignore
//! use repricer_client::{CatalogClient, EditSession};
//! use repricer_core::CurrencyFormat;
//!
//! let client = CatalogClient::new(relay_url, CurrencyFormat::BRL);
//! let session = EditSession::new(client);
//! session.refresh().await?;
//!
//! session.record_edit("gid://shopify/Product/1", "5000")?; // 50,00
//! session.commit("gid://shopify/Product/1").await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
mod conversions;
pub mod documents;
pub mod error;
pub mod session;
mod wire;

pub use catalog::CatalogClient;
pub use documents::PriceUpdate;
pub use error::{CommitError, FetchError};
pub use session::EditSession;
