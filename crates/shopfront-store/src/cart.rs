//! # Cart Store
//!
//! The persisted shopping cart: cart arithmetic from `shopfront-core`
//! wrapped with write-through persistence and a visibility flag.
//!
//! ## Persistence Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Persistence Model                               │
//! │                                                                         │
//! │  startup:   storage.get("cart") ──once──► deserialize ──► repair()      │
//! │                                           (corrupt payload → empty)     │
//! │                                                                         │
//! │  add_item / remove_item / clear /                                       │
//! │  set_quantity / increase / decrease:                                    │
//! │      mutate Cart  ──then, synchronously──►  storage.set("cart", json)   │
//! │                                                                         │
//! │  toggle_visibility: flips is_open only, nothing persisted               │
//! │                                                                         │
//! │  When any mutating call returns, an observer already sees the updated   │
//! │  AND persisted state. No eventual-consistency window.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, warn};

use shopfront_core::{Cart, CartLineItem, Money, Product};

use crate::storage::KeyValueStorage;

/// The single storage slot the cart lives under.
pub const CART_STORAGE_KEY: &str = "cart";

/// The persisted cart store.
pub struct CartStore<S: KeyValueStorage> {
    cart: Cart,
    /// UI drawer visibility. Not a correctness invariant, never persisted.
    is_open: bool,
    storage: S,
}

impl<S: KeyValueStorage> CartStore<S> {
    /// Opens the store, rehydrating from storage.
    ///
    /// The storage key is read exactly once. A present payload is
    /// deserialized and repaired (draft or out-of-range quantities are
    /// settled) before the store becomes usable; a corrupt payload logs a
    /// warning and starts an empty cart rather than failing.
    pub fn new(storage: S) -> Self {
        let cart = match storage.get(CART_STORAGE_KEY) {
            Some(payload) => match serde_json::from_str::<Vec<CartLineItem>>(&payload) {
                Ok(items) => {
                    debug!(lines = items.len(), "rehydrated cart from storage");
                    Cart::from_items(items)
                }
                Err(err) => {
                    warn!(%err, "corrupt persisted cart payload, starting empty");
                    Cart::new()
                }
            },
            None => Cart::new(),
        };

        CartStore {
            cart,
            is_open: false,
            storage,
        }
    }

    /// Writes the current item sequence to storage, replacing any prior
    /// value. Serialization failure drops this snapshot with a warning;
    /// the next mutation writes the full sequence again.
    fn persist(&self) {
        match serde_json::to_string(self.cart.items()) {
            Ok(payload) => self.storage.set(CART_STORAGE_KEY, &payload),
            Err(err) => warn!(%err, "failed to serialize cart, dropping write"),
        }
    }

    /// Adds one unit of a product (merging by product id, clamped to the
    /// product's available stock) and persists.
    pub fn add_item(&mut self, product: &Product) {
        self.cart.add_product(product);
        self.persist();
    }

    /// Removes a product's line item and persists. Idempotent.
    pub fn remove_item(&mut self, product_id: &str) {
        self.cart.remove_line(product_id);
        self.persist();
    }

    /// Empties the cart and persists.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    /// Applies raw quantity input (see `Cart::set_quantity`) and persists.
    pub fn set_quantity(&mut self, product_id: &str, raw: &str, blurred: bool) {
        self.cart.set_quantity(product_id, raw, blurred);
        self.persist();
    }

    /// Increments a line's quantity, capped at stock, and persists.
    pub fn increase_quantity(&mut self, product_id: &str) {
        self.cart.increase_quantity(product_id);
        self.persist();
    }

    /// Decrements a line's quantity, never below 1, and persists.
    pub fn decrease_quantity(&mut self, product_id: &str) {
        self.cart.decrease_quantity(product_id);
        self.persist();
    }

    /// Flips the cart drawer visibility. Line items are untouched and
    /// nothing is persisted.
    pub fn toggle_visibility(&mut self) {
        self.is_open = !self.is_open;
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// The line items, first-added first.
    pub fn items(&self) -> &[CartLineItem] {
        self.cart.items()
    }

    /// Total units across all lines.
    pub fn count(&self) -> i64 {
        self.cart.count()
    }

    /// Grand total.
    pub fn total(&self) -> Money {
        self.cart.total()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }
}
