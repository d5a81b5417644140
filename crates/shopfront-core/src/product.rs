//! # Product Types
//!
//! The catalog product and the pagination envelopes it arrives in.
//!
//! These types are the wire contract with the catalog HTTP API; fetching
//! them is the store layer's job (`shopfront-store::catalog`). Product
//! fields are camelCase on the wire; the pagination meta/links envelope
//! keeps the API's snake_case field names.

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// A catalog product.
///
/// ## Design Notes
/// - `id` is an opaque string minted by the catalog service
/// - `unit_price` is integer cents ([`Money`]), never a float
/// - `available_stock` caps any cart line's quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub image_path: String,
    pub unit_price: Money,
    pub available_stock: i64,
    pub is_active: bool,
}

/// Pagination metadata, as the catalog API reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u32,
    pub total: u64,
}

/// Pagination navigation links. `prev`/`next` are absent at the edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    pub first: String,
    pub last: String,
    #[serde(default)]
    pub prev: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
}

/// One page of the product listing: `{data, meta, links}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub data: Vec<Product>,
    pub meta: PageMeta,
    pub links: PageLinks,
}

/// A single-product response: `{data}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductEnvelope {
    pub data: Product,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_wire_shape_is_camel_case() {
        let json = r#"{
            "id": "p-1",
            "title": "Basic Tee",
            "description": "Lorem Ipsum",
            "imagePath": "/img/tee.jpg",
            "unitPrice": 3500,
            "availableStock": 3,
            "isActive": true
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, "p-1");
        assert_eq!(product.unit_price, Money::from_cents(3500));
        assert_eq!(product.available_stock, 3);

        let back = serde_json::to_string(&product).unwrap();
        assert!(back.contains("\"imagePath\""));
        assert!(back.contains("\"availableStock\""));
    }

    #[test]
    fn test_page_envelope_parses_api_response() {
        let json = r#"{
            "data": [{
                "id": "p-1",
                "title": "Basic Tee",
                "imagePath": "/img/tee.jpg",
                "unitPrice": 3500,
                "availableStock": 3,
                "isActive": true
            }],
            "meta": {"current_page": 1, "last_page": 4, "per_page": 12, "total": 42},
            "links": {"first": "/api/products?page=1", "last": "/api/products?page=4", "next": "/api/products?page=2"}
        }"#;

        let page: ProductPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.meta.total, 42);
        assert_eq!(page.links.prev, None);
        assert_eq!(page.links.next.as_deref(), Some("/api/products?page=2"));
    }
}
