//! Error taxonomy for catalog fetching and price commits.
//!
//! All failures are terminal for that one attempt; nothing here retries.

use repricer_core::PriceError;
use thiserror::Error;

/// Errors from [`crate::CatalogClient::fetch_catalog`].
///
/// A fetch is all-or-nothing: any of these aborts the pagination loop and
/// discards pages already accumulated.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP transport failed.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The relay answered with a non-success status (its error envelope is
    /// carried in `message`).
    #[error("relay error (status {status}): {message}")]
    Relay { status: u16, message: String },

    /// The platform reported errors in the response body.
    #[error("platform error: {0}")]
    Platform(String),

    /// The response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A variant carried a price the platform should never emit.
    #[error("malformed price {raw:?} for variant {variant_id}")]
    MalformedPrice { variant_id: String, raw: String },
}

/// Errors from [`crate::EditSession::commit`].
///
/// The edit buffer is left untouched on failure so the operator can retry.
#[derive(Debug, Error)]
pub enum CommitError {
    /// HTTP transport failed.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The relay answered with a non-success status.
    #[error("relay error (status {status}): {message}")]
    Relay { status: u16, message: String },

    /// The platform reported errors in the response body.
    #[error("platform error: {0}")]
    Platform(String),

    /// The mutation was accepted but one or more sub-mutations reported
    /// user errors (e.g., invalid input).
    #[error("user error: {0}")]
    UserError(String),

    /// The response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The product id is not in the fetched catalog. No network call is
    /// issued.
    #[error("unknown product: {0}")]
    UnknownProduct(String),

    /// Nothing has been recorded for this product. No network call is
    /// issued.
    #[error("no pending edit for product {0}")]
    NoPendingEdit(String),

    /// A commit for the same product is already in flight.
    #[error("commit already in flight for product {0}")]
    InFlight(String),

    /// The buffered value could not be parsed back to a decimal price.
    #[error("invalid buffered price: {0}")]
    InvalidPrice(#[from] PriceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_display() {
        let err = FetchError::Relay {
            status: 500,
            message: "upstream down".to_string(),
        };
        assert_eq!(err.to_string(), "relay error (status 500): upstream down");

        let err = FetchError::Platform("throttled".to_string());
        assert_eq!(err.to_string(), "platform error: throttled");
    }

    #[test]
    fn commit_error_display() {
        let err = CommitError::UnknownProduct("gid://shopify/Product/9".to_string());
        assert_eq!(err.to_string(), "unknown product: gid://shopify/Product/9");

        let err = CommitError::InFlight("gid://shopify/Product/9".to_string());
        assert_eq!(
            err.to_string(),
            "commit already in flight for product gid://shopify/Product/9"
        );
    }
}
