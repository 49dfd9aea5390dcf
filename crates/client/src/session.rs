//! The price edit session.
//!
//! Holds the fetched catalog and the edit buffer, and submits batched price
//! mutations. Shared state lives behind a mutex that is only held between
//! suspension points, so an edit recorded while a commit is awaiting the
//! network neither blocks nor gets lost.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use repricer_core::{PriceError, Product, canonical_string};
use tracing::instrument;

use crate::catalog::{CatalogClient, join_messages};
use crate::documents::{self, PriceUpdate};
use crate::error::{CommitError, FetchError};
use crate::wire::{GraphQlResponse, VariantUpdateData};

/// In-memory editing state for one operator session.
///
/// The edit buffer maps a product id to its pending formatted price string;
/// on commit every variant of that product receives the same edited price.
pub struct EditSession {
    client: CatalogClient,
    state: Mutex<SessionState>,
}

#[derive(Default)]
struct SessionState {
    products: Vec<Product>,
    buffer: HashMap<String, String>,
    /// Product ids with a commit currently awaiting the network.
    in_flight: HashSet<String>,
}

impl EditSession {
    /// Create an empty session; call [`Self::refresh`] to load the catalog.
    #[must_use]
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Create a session over an already-fetched catalog.
    #[must_use]
    pub fn with_products(client: CatalogClient, products: Vec<Product>) -> Self {
        let session = Self::new(client);
        session.lock().products = products;
        session
    }

    /// Replace the catalog wholesale with a fresh fetch.
    ///
    /// # Errors
    ///
    /// Propagates [`FetchError`]; the previous catalog is kept on failure.
    pub async fn refresh(&self) -> Result<(), FetchError> {
        let products = self.client.fetch_catalog().await?;
        self.lock().products = products;
        Ok(())
    }

    /// Snapshot of the current catalog.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.lock().products.clone()
    }

    /// The pending formatted price for a product, if any.
    #[must_use]
    pub fn pending_edit(&self, product_id: &str) -> Option<String> {
        self.lock().buffer.get(product_id).cloned()
    }

    /// Record a price edit from raw operator input.
    ///
    /// All non-digit characters are stripped; the remaining digits are minor
    /// currency units (`"1234"` means 12.34), reformatted to the display
    /// locale and stored under `product_id`.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError`] when the input holds no digits; the buffer is
    /// left unchanged.
    pub fn record_edit(&self, product_id: &str, raw_input: &str) -> Result<(), PriceError> {
        let amount = self.client.format().from_minor_units(raw_input)?;
        let display = self.client.format().format(amount);
        self.lock().buffer.insert(product_id.to_string(), display);
        Ok(())
    }

    /// Commit the pending edit for a product.
    ///
    /// Builds one update instruction per variant, every instruction carrying
    /// the product's single edited price, and submits them as one batched
    /// mutation in a single round trip. On success the buffer entry is
    /// removed unless a newer edit arrived while the commit was in flight;
    /// on failure the buffer is left untouched so the operator can retry.
    ///
    /// # Errors
    ///
    /// Fails without a network call for an unknown product id, a missing
    /// buffer entry, or a commit already in flight for the same product.
    /// Transport and platform failures surface as [`CommitError`].
    #[instrument(skip(self))]
    pub async fn commit(&self, product_id: &str) -> Result<(), CommitError> {
        let (updates, submitted) = self.prepare_commit(product_id)?;

        let result = self.submit(&updates).await;

        let mut state = self.lock();
        state.in_flight.remove(product_id);
        match result {
            Ok(()) => {
                // Drop the entry only if no newer edit arrived mid-flight.
                if state.buffer.get(product_id) == Some(&submitted) {
                    state.buffer.remove(product_id);
                }
                Ok(())
            }
            Err(error) => {
                tracing::error!(error = %error, "price commit failed");
                Err(error)
            }
        }
    }

    /// Validate a commit and mark the product in flight.
    ///
    /// Returns the update instructions and the buffered display value they
    /// were derived from.
    fn prepare_commit(
        &self,
        product_id: &str,
    ) -> Result<(Vec<PriceUpdate>, String), CommitError> {
        let mut state = self.lock();

        if state.in_flight.contains(product_id) {
            return Err(CommitError::InFlight(product_id.to_string()));
        }

        let product = state
            .products
            .iter()
            .find(|product| product.id == product_id)
            .ok_or_else(|| CommitError::UnknownProduct(product_id.to_string()))?;

        let display = state
            .buffer
            .get(product_id)
            .cloned()
            .ok_or_else(|| CommitError::NoPendingEdit(product_id.to_string()))?;

        let amount = self.client.format().parse(&display)?;
        let price = canonical_string(amount);

        let updates = product
            .variants
            .iter()
            .map(|variant| PriceUpdate {
                variant_id: variant.id.clone(),
                price: price.clone(),
            })
            .collect();

        state.in_flight.insert(product_id.to_string());
        Ok((updates, display))
    }

    /// Submit the batched mutation and validate the response.
    async fn submit(&self, updates: &[PriceUpdate]) -> Result<(), CommitError> {
        let document = documents::variant_price_update(updates);
        let (status, body) = self.client.post_query(&document).await?;

        if !status.is_success() {
            return Err(CommitError::Relay {
                status: status.as_u16(),
                message: body,
            });
        }

        let response: GraphQlResponse<VariantUpdateData> = serde_json::from_str(&body)?;
        if !response.errors.is_empty() {
            return Err(CommitError::Platform(join_messages(&response.errors)));
        }

        let data = response
            .data
            .ok_or_else(|| CommitError::Platform("no data in response".to_string()))?;

        let user_errors: Vec<String> = data
            .values()
            .flat_map(|payload| payload.user_errors.iter())
            .map(|error| {
                let field = error
                    .field
                    .as_ref()
                    .map_or_else(String::new, |field| field.join("."));
                format!("{field}: {}", error.message)
            })
            .collect();
        if !user_errors.is_empty() {
            return Err(CommitError::UserError(user_errors.join("; ")));
        }

        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use repricer_core::CurrencyFormat;
    use url::Url;

    use super::*;

    fn test_session() -> EditSession {
        let endpoint = Url::parse("http://localhost:5000/api/graphql").unwrap();
        EditSession::new(CatalogClient::new(endpoint, CurrencyFormat::BRL))
    }

    #[test]
    fn record_edit_formats_minor_units_to_the_locale() {
        let session = test_session();
        session.record_edit("gid://shopify/Product/1", "1234").unwrap();
        assert_eq!(
            session.pending_edit("gid://shopify/Product/1").as_deref(),
            Some("12,34")
        );
    }

    #[test]
    fn record_edit_strips_non_digits() {
        let session = test_session();
        session.record_edit("gid://shopify/Product/1", "R$ 50,00").unwrap();
        assert_eq!(
            session.pending_edit("gid://shopify/Product/1").as_deref(),
            Some("50,00")
        );
    }

    #[test]
    fn record_edit_rejects_input_without_digits() {
        let session = test_session();
        let err = session.record_edit("gid://shopify/Product/1", "abc").unwrap_err();
        assert_eq!(err, PriceError::Empty);
        assert!(session.pending_edit("gid://shopify/Product/1").is_none());
    }

    #[test]
    fn later_edits_replace_earlier_ones() {
        let session = test_session();
        session.record_edit("gid://shopify/Product/1", "100").unwrap();
        session.record_edit("gid://shopify/Product/1", "5000").unwrap();
        assert_eq!(
            session.pending_edit("gid://shopify/Product/1").as_deref(),
            Some("50,00")
        );
    }

    #[tokio::test]
    async fn commit_without_pending_edit_fails_fast() {
        let session = test_session();
        session.lock().products = vec![Product {
            id: "gid://shopify/Product/1".to_string(),
            title: "Shirt".to_string(),
            handle: "shirt".to_string(),
            image_url: String::new(),
            variants: vec![],
        }];

        let err = session.commit("gid://shopify/Product/1").await.unwrap_err();
        assert!(matches!(err, CommitError::NoPendingEdit(_)));
    }
}
