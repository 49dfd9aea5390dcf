//! Conversion from the platform's wire shapes into the local model.

use std::str::FromStr;

use repricer_core::{CurrencyFormat, Product, Variant};
use rust_decimal::Decimal;

use crate::error::FetchError;
use crate::wire::{ProductNode, VariantNode};

/// Flatten a product node into the local [`Product`] shape.
///
/// An absent image maps to the empty-string sentinel, never `None`, for
/// display simplicity.
pub(crate) fn convert_product(
    node: ProductNode,
    format: &CurrencyFormat,
) -> Result<Product, FetchError> {
    let image_url = node
        .images
        .edges
        .into_iter()
        .next()
        .map_or_else(String::new, |edge| edge.node.src);

    let variants = node
        .variants
        .edges
        .into_iter()
        .map(|edge| convert_variant(edge.node, format))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Product {
        id: node.id,
        title: node.title,
        handle: node.handle,
        image_url,
        variants,
    })
}

fn convert_variant(node: VariantNode, format: &CurrencyFormat) -> Result<Variant, FetchError> {
    let price = Decimal::from_str(&node.price).map_err(|_| FetchError::MalformedPrice {
        variant_id: node.id.clone(),
        raw: node.price.clone(),
    })?;

    Ok(Variant {
        display_price: format.format(price),
        price,
        id: node.id,
        title: node.title,
        image_url: node.image.map_or_else(String::new, |image| image.src),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::wire::{Connection, Edge, ImageNode};

    fn node(price: &str, image: Option<&str>) -> ProductNode {
        ProductNode {
            id: "gid://shopify/Product/1".to_string(),
            title: "Shirt".to_string(),
            handle: "shirt".to_string(),
            images: Connection {
                edges: image
                    .map(|src| Edge {
                        node: ImageNode {
                            src: src.to_string(),
                        },
                    })
                    .into_iter()
                    .collect(),
            },
            variants: Connection {
                edges: vec![Edge {
                    node: VariantNode {
                        id: "gid://shopify/ProductVariant/11".to_string(),
                        title: "Small".to_string(),
                        price: price.to_string(),
                        image: None,
                    },
                }],
            },
        }
    }

    #[test]
    fn absent_image_maps_to_empty_string() {
        let product = convert_product(node("19.99", None), &CurrencyFormat::BRL).unwrap();
        assert_eq!(product.image_url, "");
        assert_eq!(product.variants[0].image_url, "");
    }

    #[test]
    fn price_is_parsed_and_formatted() {
        let product = convert_product(node("1234.5", Some("https://cdn/x.png")), &CurrencyFormat::BRL)
            .unwrap();
        assert_eq!(product.image_url, "https://cdn/x.png");
        assert_eq!(product.variants[0].price.to_string(), "1234.5");
        assert_eq!(product.variants[0].display_price, "1.234,50");
    }

    #[test]
    fn malformed_price_is_rejected() {
        let err = convert_product(node("not-a-number", None), &CurrencyFormat::BRL).unwrap_err();
        assert!(matches!(err, FetchError::MalformedPrice { .. }));
    }
}
