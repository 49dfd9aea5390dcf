//! GraphQL document builders.
//!
//! The relay forwards a JSON object with a single `query` string field, so
//! documents are plain strings with escaped interpolation rather than
//! schema-generated types. Interpolated values (cursors, ids, prices) are
//! string-escaped before insertion.

/// Products requested per catalog page.
pub const PRODUCTS_PAGE_SIZE: u32 = 250;

/// Variants requested per product.
pub const VARIANTS_PAGE_SIZE: u32 = 100;

/// One variant price update instruction within a batched mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceUpdate {
    /// Variant to update.
    pub variant_id: String,
    /// Canonical numeric price string (e.g., `"50.00"`).
    pub price: String,
}

/// Query for one page of the product catalog.
///
/// Requests id/title/handle, the first image, and up to
/// [`VARIANTS_PAGE_SIZE`] variants (id/title/price/image) for up to
/// [`PRODUCTS_PAGE_SIZE`] products, plus the pagination info needed to
/// continue the traversal.
#[must_use]
pub fn products_page(after: Option<&str>) -> String {
    let after_arg = after.map_or_else(String::new, |cursor| {
        format!(", after: \"{}\"", escape(cursor))
    });

    format!(
        r#"{{
  products(first: {PRODUCTS_PAGE_SIZE}{after_arg}) {{
    edges {{
      node {{
        id
        title
        handle
        images(first: 1) {{
          edges {{
            node {{
              src
            }}
          }}
        }}
        variants(first: {VARIANTS_PAGE_SIZE}) {{
          edges {{
            node {{
              id
              title
              price
              image {{
                src
              }}
            }}
          }}
        }}
      }}
    }}
    pageInfo {{
      hasNextPage
      endCursor
    }}
  }}
}}"#
    )
}

/// Batched mutation updating one variant price per aliased sub-mutation.
#[must_use]
pub fn variant_price_update(updates: &[PriceUpdate]) -> String {
    let mut body = String::new();
    for (index, update) in updates.iter().enumerate() {
        body.push_str(&format!(
            r#"  update{index}: productVariantUpdate(input: {{ id: "{id}", price: "{price}" }}) {{
    productVariant {{
      id
      price
    }}
    userErrors {{
      field
      message
    }}
  }}
"#,
            id = escape(&update.variant_id),
            price = escape(&update.price),
        ));
    }

    format!("mutation updateVariantPrices {{\n{body}}}")
}

/// Escape a value for inclusion inside a double-quoted GraphQL string.
fn escape(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_has_no_cursor() {
        let document = products_page(None);
        assert!(document.contains("products(first: 250)"));
        assert!(!document.contains("after:"));
        assert!(document.contains("variants(first: 100)"));
        assert!(document.contains("hasNextPage"));
        assert!(document.contains("endCursor"));
    }

    #[test]
    fn subsequent_pages_carry_the_cursor() {
        let document = products_page(Some("abc123"));
        assert!(document.contains("products(first: 250, after: \"abc123\")"));
    }

    #[test]
    fn cursors_are_escaped() {
        let document = products_page(Some("cu\"rsor"));
        assert!(document.contains("after: \"cu\\\"rsor\""));
    }

    #[test]
    fn mutation_aliases_one_sub_mutation_per_update() {
        let updates = vec![
            PriceUpdate {
                variant_id: "gid://shopify/ProductVariant/1".to_string(),
                price: "50.00".to_string(),
            },
            PriceUpdate {
                variant_id: "gid://shopify/ProductVariant/2".to_string(),
                price: "50.00".to_string(),
            },
        ];

        let document = variant_price_update(&updates);
        assert!(document.starts_with("mutation updateVariantPrices {"));
        assert!(document.contains("update0: productVariantUpdate"));
        assert!(document.contains("update1: productVariantUpdate"));
        assert!(!document.contains("update2:"));
        assert_eq!(document.matches("price: \"50.00\"").count(), 2);
        assert!(document.contains("userErrors"));
    }
}
