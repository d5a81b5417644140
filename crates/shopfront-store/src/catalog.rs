//! # Catalog Boundary & Product Store
//!
//! The asynchronous catalog API contract and the product store that
//! caches its responses.
//!
//! ## Request Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Catalog Request Lifecycle                             │
//! │                                                                         │
//! │  get_all(page) / get_by_id(id)                                          │
//! │        │                                                                │
//! │        ├── loading = true, error cleared                                │
//! │        │                                                                │
//! │        ├── Ok(envelope)  ──► cache replaced (products/meta/links        │
//! │        │                     or current product)                        │
//! │        │                                                                │
//! │        └── Err(e)        ──► error = e.message,                         │
//! │                              cached data left as last-known-good        │
//! │        then: loading = false, always                                    │
//! │                                                                         │
//! │  No retry, no cancellation: a caller supersedes a stale request by      │
//! │  simply not acting on its response.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cached product list doubles as the product cache the cart-add path
//! consults: `find(id)` resolves a product id to its full record without
//! another network round trip.

use tracing::debug;

use shopfront_core::{PageLinks, PageMeta, Product, ProductEnvelope, ProductPage};

use crate::error::CatalogError;

/// The catalog query contract. Implementations own transport (HTTP client,
/// in-memory fixture) and normalize every failure into [`CatalogError`].
#[allow(async_fn_in_trait)]
pub trait CatalogApi {
    /// One page of the active-product listing: `{data, meta, links}`.
    async fn list_products(&self, page: u32) -> Result<ProductPage, CatalogError>;

    /// A single product by id: `{data}`.
    async fn get_product(&self, id: &str) -> Result<ProductEnvelope, CatalogError>;
}

/// Client-side product state: the cached listing page, the currently
/// viewed product, and the loading/error flags the UI renders from.
pub struct ProductStore<C> {
    api: C,
    products: Vec<Product>,
    current: Option<Product>,
    meta: Option<PageMeta>,
    links: Option<PageLinks>,
    loading: bool,
    error: Option<String>,
}

impl<C: CatalogApi> ProductStore<C> {
    pub fn new(api: C) -> Self {
        ProductStore {
            api,
            products: Vec::new(),
            current: None,
            meta: None,
            links: None,
            loading: false,
            error: None,
        }
    }

    /// Loads a listing page. On failure the previous page stays cached
    /// (last-known-good) and only the error message changes.
    pub async fn get_all(&mut self, page: u32) {
        self.loading = true;
        self.error = None;

        match self.api.list_products(page).await {
            Ok(listing) => {
                debug!(page, products = listing.data.len(), "catalog page loaded");
                self.products = listing.data;
                self.meta = Some(listing.meta);
                self.links = Some(listing.links);
            }
            Err(err) => {
                self.error = Some(err.message);
            }
        }

        self.loading = false;
    }

    /// Loads a single product into `current`. Same failure semantics as
    /// [`Self::get_all`].
    pub async fn get_by_id(&mut self, id: &str) {
        self.loading = true;
        self.error = None;

        match self.api.get_product(id).await {
            Ok(envelope) => {
                self.current = Some(envelope.data);
            }
            Err(err) => {
                self.error = Some(err.message);
            }
        }

        self.loading = false;
    }

    /// The in-memory product cache lookup the cart-add path uses.
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// The cached listing page.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The currently viewed product, if one was fetched.
    pub fn current(&self) -> Option<&Product> {
        self.current.as_ref()
    }

    pub fn meta(&self) -> Option<&PageMeta> {
        self.meta.as_ref()
    }

    pub fn links(&self) -> Option<&PageLinks> {
        self.links.as_ref()
    }

    /// True while a catalog request is outstanding.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// The last request's failure message, cleared when a new request starts.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_core::Money;
    use std::sync::{Arc, Mutex};

    fn test_product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            title: format!("Product {id}"),
            description: None,
            image_path: format!("/img/{id}.jpg"),
            unit_price: Money::from_cents(3500),
            available_stock: 3,
            is_active: true,
        }
    }

    fn test_page(ids: &[&str]) -> ProductPage {
        ProductPage {
            data: ids.iter().map(|id| test_product(id)).collect(),
            meta: PageMeta {
                current_page: 1,
                last_page: 1,
                per_page: 12,
                total: ids.len() as u64,
            },
            links: PageLinks {
                first: "/api/products?page=1".to_string(),
                last: "/api/products?page=1".to_string(),
                prev: None,
                next: None,
            },
        }
    }

    /// A programmable catalog double; clones share the scripted responses
    /// so a test can swap them after the store takes ownership.
    #[derive(Clone)]
    struct StubCatalog {
        page: Arc<Mutex<Result<ProductPage, CatalogError>>>,
        product: Arc<Mutex<Result<ProductEnvelope, CatalogError>>>,
    }

    impl StubCatalog {
        fn new(page: Result<ProductPage, CatalogError>) -> Self {
            StubCatalog {
                page: Arc::new(Mutex::new(page)),
                product: Arc::new(Mutex::new(Err(CatalogError::new("unscripted")))),
            }
        }

        fn script_page(&self, page: Result<ProductPage, CatalogError>) {
            *self.page.lock().unwrap() = page;
        }

        fn script_product(&self, product: Result<ProductEnvelope, CatalogError>) {
            *self.product.lock().unwrap() = product;
        }
    }

    impl CatalogApi for StubCatalog {
        async fn list_products(&self, _page: u32) -> Result<ProductPage, CatalogError> {
            self.page.lock().unwrap().clone()
        }

        async fn get_product(&self, _id: &str) -> Result<ProductEnvelope, CatalogError> {
            self.product.lock().unwrap().clone()
        }
    }

    #[tokio::test]
    async fn test_get_all_caches_page_and_clears_loading() {
        let api = StubCatalog::new(Ok(test_page(&["tee", "mug"])));
        let mut store = ProductStore::new(api);

        store.get_all(1).await;

        assert!(!store.loading());
        assert_eq!(store.error(), None);
        assert_eq!(store.products().len(), 2);
        assert_eq!(store.meta().unwrap().total, 2);
    }

    #[tokio::test]
    async fn test_failure_keeps_last_known_good_data() {
        let api = StubCatalog::new(Ok(test_page(&["tee"])));
        let mut store = ProductStore::new(api.clone());

        store.get_all(1).await;
        assert_eq!(store.products().len(), 1);

        api.script_page(Err(CatalogError::new("No server response")));
        store.get_all(2).await;

        // Error surfaced, previous page intact.
        assert_eq!(store.error(), Some("No server response"));
        assert_eq!(store.products().len(), 1);
        assert!(!store.loading());
    }

    #[tokio::test]
    async fn test_new_request_clears_previous_error() {
        let api = StubCatalog::new(Err(CatalogError::new("No server response")));
        let mut store = ProductStore::new(api.clone());

        store.get_all(1).await;
        assert!(store.error().is_some());

        api.script_page(Ok(test_page(&["tee"])));
        store.get_all(1).await;
        assert_eq!(store.error(), None);
        assert_eq!(store.products().len(), 1);
    }

    #[tokio::test]
    async fn test_get_by_id_sets_current_product() {
        let api = StubCatalog::new(Ok(test_page(&[])));
        api.script_product(Ok(ProductEnvelope {
            data: test_product("tee"),
        }));
        let mut store = ProductStore::new(api);

        store.get_by_id("tee").await;

        assert_eq!(store.current().unwrap().id, "tee");
        assert_eq!(store.error(), None);
    }

    #[tokio::test]
    async fn test_find_resolves_from_cached_listing() {
        let api = StubCatalog::new(Ok(test_page(&["tee", "mug"])));
        let mut store = ProductStore::new(api);
        store.get_all(1).await;

        assert_eq!(store.find("mug").unwrap().title, "Product mug");
        assert!(store.find("gone").is_none());
    }
}
