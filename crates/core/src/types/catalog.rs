//! The local catalog data model.
//!
//! Products and variants are built from a fetch response and replaced
//! wholesale on each fetch; they are never partially mutated. Pending price
//! edits live in the edit session's buffer, not here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product as known to the remote platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Opaque platform identifier (e.g., `gid://shopify/Product/123`).
    pub id: String,
    /// Product title.
    pub title: String,
    /// URL slug.
    pub handle: String,
    /// URL of the first product image, or `""` when the platform has none.
    pub image_url: String,
    /// Variants in platform order. A variant belongs to exactly one product.
    pub variants: Vec<Variant>,
}

/// A purchasable variant of a [`Product`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Opaque platform identifier (e.g., `gid://shopify/ProductVariant/456`).
    pub id: String,
    /// Variant title.
    pub title: String,
    /// Canonical numeric price, preserved for re-transmission.
    pub price: Decimal,
    /// Locale-formatted price for display (fixed 2 fraction digits).
    pub display_price: String,
    /// URL of the variant image, or `""` when the platform has none.
    pub image_url: String,
}
