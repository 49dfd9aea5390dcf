//! Catalog fetching via cursor-based pagination.

use repricer_core::{CurrencyFormat, Product};
use reqwest::StatusCode;
use serde_json::json;
use tracing::instrument;
use url::Url;

use crate::conversions::convert_product;
use crate::documents;
use crate::error::FetchError;
use crate::wire::{GraphQlError, GraphQlResponse, ProductConnection, ProductsData};

/// Client for the relay's query/mutation endpoint.
///
/// Holds the HTTP client, the relay endpoint URL, and the display locale.
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    endpoint: Url,
    format: CurrencyFormat,
}

impl CatalogClient {
    /// Create a client pointed at the relay endpoint
    /// (e.g., `http://localhost:5000/api/graphql`).
    #[must_use]
    pub fn new(endpoint: Url, format: CurrencyFormat) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            format,
        }
    }

    /// The display locale used when normalizing fetched prices.
    #[must_use]
    pub const fn format(&self) -> &CurrencyFormat {
        &self.format
    }

    /// Fetch the complete catalog.
    ///
    /// Issues one page request at a time (up to
    /// [`documents::PRODUCTS_PAGE_SIZE`] products each), passing the
    /// returned cursor into the next request until the platform reports no
    /// further page. Pages are validated before the traversal continues.
    ///
    /// # Errors
    ///
    /// All-or-nothing: any transport, relay, platform, or decode error
    /// aborts the fetch and discards pages already accumulated. No retry.
    #[instrument(skip(self))]
    pub async fn fetch_catalog(&self) -> Result<Vec<Product>, FetchError> {
        let mut products = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = self.fetch_page(cursor.as_deref()).await?;
            let page_info = page.page_info;

            for edge in page.edges {
                products.push(convert_product(edge.node, &self.format)?);
            }

            if !page_info.has_next_page {
                break;
            }
            let next = page_info.end_cursor.ok_or_else(|| {
                FetchError::Platform("hasNextPage is set but endCursor is missing".to_string())
            })?;
            cursor = Some(next);
        }

        tracing::info!(products = products.len(), "catalog fetched");
        Ok(products)
    }

    /// Fetch and validate a single catalog page.
    async fn fetch_page(&self, after: Option<&str>) -> Result<ProductConnection, FetchError> {
        let document = documents::products_page(after);
        let (status, body) = self.post_query(&document).await?;

        if !status.is_success() {
            return Err(FetchError::Relay {
                status: status.as_u16(),
                message: body,
            });
        }

        let response: GraphQlResponse<ProductsData> = serde_json::from_str(&body)?;
        if !response.errors.is_empty() {
            return Err(FetchError::Platform(join_messages(&response.errors)));
        }

        response
            .data
            .map(|data| data.products)
            .ok_or_else(|| FetchError::Platform("no data in response".to_string()))
    }

    /// POST a query document to the relay as `{"query": ...}` and return
    /// the raw status and body.
    pub(crate) async fn post_query(
        &self,
        document: &str,
    ) -> Result<(StatusCode, String), reqwest::Error> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&json!({ "query": document }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }
}

pub(crate) fn join_messages(errors: &[GraphQlError]) -> String {
    errors
        .iter()
        .map(|error| error.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
