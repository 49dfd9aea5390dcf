//! Serde shapes for the platform's JSON responses.
//!
//! These mirror the connection/edges/node structure the platform returns;
//! [`crate::conversions`] flattens them into the local model.

use std::collections::HashMap;

use serde::Deserialize;

/// Top-level GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// A platform-reported error.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
    pub message: String,
}

/// `data` payload of the products page query.
#[derive(Debug, Deserialize)]
pub(crate) struct ProductsData {
    pub products: ProductConnection,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductConnection {
    pub edges: Vec<Edge<ProductNode>>,
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PageInfo {
    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,
    #[serde(rename = "endCursor")]
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Connection<T> {
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductNode {
    pub id: String,
    pub title: String,
    pub handle: String,
    pub images: Connection<ImageNode>,
    pub variants: Connection<VariantNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImageNode {
    pub src: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VariantNode {
    pub id: String,
    pub title: String,
    /// Raw numeric price string as transmitted by the platform.
    pub price: String,
    pub image: Option<ImageNode>,
}

/// `data` payload of the batched price mutation: one entry per alias.
pub(crate) type VariantUpdateData = HashMap<String, VariantUpdatePayload>;

#[derive(Debug, Deserialize)]
pub(crate) struct VariantUpdatePayload {
    #[serde(rename = "productVariant")]
    #[allow(dead_code)]
    pub product_variant: Option<UpdatedVariant>,
    #[serde(default, rename = "userErrors")]
    pub user_errors: Vec<UserError>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub(crate) struct UpdatedVariant {
    pub id: String,
    pub price: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserError {
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}
