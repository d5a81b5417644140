//! # Cart Aggregate
//!
//! The pure cart: line items, quantity arithmetic, derived totals, and the
//! rehydration-repair pass. Persistence lives in `shopfront-store`; this
//! module never touches storage.
//!
//! ## Quantity Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Line Item Quantity States                          │
//! │                                                                         │
//! │             set_quantity("", blur=false)                                │
//! │  Settled(n) ────────────────────────────►  Draft (None)                 │
//! │     ▲                                          │                        │
//! │     │  set_quantity("", blur=true) → 1         │                        │
//! │     │  set_quantity(digits)        → clamp     │                        │
//! │     │  increase/decrease           → 1         │                        │
//! │     └──────────────────────────────────────────┘                        │
//! │                                                                         │
//! │  Invariant: 1 ≤ settled quantity ≤ available_stock                      │
//! │  Drafts exist only mid-edit; repair() settles every draft to 1, so      │
//! │  callers never see a draft after rehydration.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure path clamps, repairs, or logs a warning. Nothing here
//! returns an error or panics; the cart stays interactive.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::money::Money;
use crate::product::Product;

/// An item in the shopping cart.
///
/// Product data is frozen at the time of adding: the cart keeps displaying
/// a consistent title, image and price even if the catalog changes later.
/// `quantity: None` is the transient draft state while the user edits the
/// quantity input; a persisted draft serializes as `null` and is repaired
/// to 1 on rehydration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub product_id: String,
    pub title: String,
    pub image_path: String,
    pub unit_price: Money,
    pub available_stock: i64,
    #[serde(default)]
    pub quantity: Option<i64>,
    /// When this item was added (frozen, survives rehydration).
    #[serde(default = "Utc::now")]
    pub added_at: DateTime<Utc>,
}

impl CartLineItem {
    /// Freezes a product into a new line item with quantity 1.
    pub fn from_product(product: &Product) -> Self {
        CartLineItem {
            product_id: product.id.clone(),
            title: product.title.clone(),
            image_path: product.image_path.clone(),
            unit_price: product.unit_price,
            available_stock: product.available_stock,
            quantity: Some(1),
            added_at: Utc::now(),
        }
    }

    /// The quantity a derived computation sees: drafts count as 0.
    pub fn settled_quantity(&self) -> i64 {
        self.quantity.unwrap_or(0)
    }

    /// Line total (unit price × quantity, drafts as 0).
    pub fn line_total(&self) -> Money {
        self.unit_price * self.settled_quantity()
    }
}

/// Clamps a resolved quantity into `[1, available_stock]`.
///
/// Stock below 1 still clamps to 1: a line item that exists always shows
/// at least one unit (add refuses to create lines for stockless products).
fn clamp_quantity(quantity: i64, available_stock: i64) -> i64 {
    quantity.clamp(1, available_stock.max(1))
}

/// The shopping cart: an ordered sequence of line items, first-added first.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding an existing product
///   increments its quantity instead of appending)
/// - Every settled quantity is within `[1, available_stock]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Builds a cart from a deserialized item sequence, then repairs it.
    /// This is the only entry point for persisted payloads, so no caller
    /// ever observes a draft or out-of-range quantity from storage.
    pub fn from_items(items: Vec<CartLineItem>) -> Self {
        let mut cart = Cart { items };
        cart.repair();
        cart
    }

    /// The line items, first-added first.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Looks up the line for a product.
    pub fn line(&self, product_id: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines (drafts count as 0).
    pub fn count(&self) -> i64 {
        self.items.iter().map(CartLineItem::settled_quantity).sum()
    }

    /// Grand total: Σ unit price × quantity.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Adds one unit of a product.
    ///
    /// - Missing product id: warning, no-op
    /// - Already in the cart: +1 only while below `available_stock`,
    ///   otherwise a capacity warning and no change
    /// - Not in the cart: appended at the end with quantity 1 (refused
    ///   with a warning when the product has no stock at all)
    pub fn add_product(&mut self, product: &Product) {
        if product.id.is_empty() {
            warn!("add_product without a product id, ignoring");
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            let current = item.settled_quantity();
            if current < item.available_stock {
                item.quantity = Some(current + 1);
            } else {
                warn!(
                    product_id = %product.id,
                    available_stock = item.available_stock,
                    "cart line already at stock capacity"
                );
            }
            return;
        }

        if product.available_stock < 1 {
            warn!(product_id = %product.id, "product is out of stock, not adding");
            return;
        }
        self.items.push(CartLineItem::from_product(product));
    }

    /// Removes a product's line. Idempotent: absent lines are a no-op.
    pub fn remove_line(&mut self, product_id: &str) {
        self.items.retain(|i| i.product_id != product_id);
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Applies raw quantity input to a line.
    ///
    /// The input is sanitized to digits with leading zeros stripped, so
    /// `"0"` sanitizes to nothing. An empty result keeps the line in the
    /// draft state while the user is still typing, unless this is a blur
    /// event, which settles the draft to 1. Anything else parses and
    /// clamps into `[1, available_stock]` (absurdly long digit runs
    /// saturate to the stock cap).
    pub fn set_quantity(&mut self, product_id: &str, raw: &str, blurred: bool) {
        let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) else {
            warn!(product_id, "set_quantity on a product not in the cart");
            return;
        };

        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        let digits = digits.trim_start_matches('0');
        if digits.is_empty() {
            item.quantity = if blurred { Some(1) } else { None };
            return;
        }

        let parsed = digits.parse::<i64>().unwrap_or(i64::MAX);
        item.quantity = Some(clamp_quantity(parsed, item.available_stock));
    }

    /// Increments a line's quantity by 1, capped at `available_stock`.
    /// A draft settles to 1.
    pub fn increase_quantity(&mut self, product_id: &str) {
        let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) else {
            warn!(product_id, "increase_quantity on a product not in the cart");
            return;
        };
        match item.quantity {
            None => item.quantity = Some(1),
            Some(q) if q < item.available_stock => item.quantity = Some(q + 1),
            Some(_) => {
                warn!(
                    product_id,
                    available_stock = item.available_stock,
                    "cart line already at stock capacity"
                );
            }
        }
    }

    /// Decrements a line's quantity by 1, never below 1.
    /// A draft settles to 1.
    pub fn decrease_quantity(&mut self, product_id: &str) {
        let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) else {
            warn!(product_id, "decrease_quantity on a product not in the cart");
            return;
        };
        let current = item.quantity.unwrap_or(1);
        item.quantity = Some((current - 1).max(1));
    }

    /// The rehydration-repair pass: settles every draft quantity to 1 and
    /// clamps settled quantities back into range, so a payload persisted
    /// mid-edit (or tampered with) never leaks an invalid line.
    pub fn repair(&mut self) {
        for item in &mut self.items {
            item.quantity = Some(match item.quantity {
                None => 1,
                Some(q) => clamp_quantity(q, item.available_stock),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: &str, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            title: format!("Product {id}"),
            description: None,
            image_path: format!("/img/{id}.jpg"),
            unit_price: Money::from_cents(3500),
            available_stock: stock,
            is_active: true,
        }
    }

    #[test]
    fn test_add_product_appends_then_merges() {
        let mut cart = Cart::new();
        let tee = test_product("tee", 5);
        let mug = test_product("mug", 2);

        cart.add_product(&tee);
        cart.add_product(&mug);
        cart.add_product(&tee);

        // Unique by product id, insertion order preserved.
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].product_id, "tee");
        assert_eq!(cart.items()[0].quantity, Some(2));
        assert_eq!(cart.items()[1].quantity, Some(1));
    }

    #[test]
    fn test_add_product_clamps_at_available_stock() {
        let mut cart = Cart::new();
        let tee = test_product("tee", 3);

        for _ in 0..4 {
            cart.add_product(&tee);
        }

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, Some(3));
    }

    #[test]
    fn test_add_product_without_id_is_a_noop() {
        let mut cart = Cart::new();
        cart.add_product(&test_product("", 5));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_product_without_stock_is_refused() {
        let mut cart = Cart::new();
        cart.add_product(&test_product("gone", 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_line_is_idempotent() {
        let mut cart = Cart::new();
        cart.add_product(&test_product("tee", 5));
        cart.add_product(&test_product("mug", 5));

        cart.remove_line("tee");
        assert_eq!(cart.items().len(), 1);

        cart.remove_line("tee");
        cart.remove_line("never-added");
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].product_id, "mug");
    }

    #[test]
    fn test_set_quantity_sanitizes_and_clamps() {
        let mut cart = Cart::new();
        cart.add_product(&test_product("tee", 9));

        cart.set_quantity("tee", "7", false);
        assert_eq!(cart.line("tee").unwrap().quantity, Some(7));

        // Non-digits and leading zeros stripped before parsing.
        cart.set_quantity("tee", " 4x ", false);
        assert_eq!(cart.line("tee").unwrap().quantity, Some(4));
        cart.set_quantity("tee", "007", false);
        assert_eq!(cart.line("tee").unwrap().quantity, Some(7));

        cart.set_quantity("tee", "250", false);
        assert_eq!(cart.line("tee").unwrap().quantity, Some(9));

        // Longer than i64: saturates, then clamps to stock.
        cart.set_quantity("tee", "99999999999999999999999", false);
        assert_eq!(cart.line("tee").unwrap().quantity, Some(9));
    }

    #[test]
    fn test_set_quantity_empty_keeps_draft_until_blur() {
        let mut cart = Cart::new();
        cart.add_product(&test_product("tee", 9));

        // Mid-edit: the field is cleared but focus remains.
        cart.set_quantity("tee", "", false);
        assert_eq!(cart.line("tee").unwrap().quantity, None);

        // "0" sanitizes to nothing, so it is still an in-progress draft.
        cart.set_quantity("tee", "0", false);
        assert_eq!(cart.line("tee").unwrap().quantity, None);

        // Blur settles the draft to 1.
        cart.set_quantity("tee", "0", true);
        assert_eq!(cart.line("tee").unwrap().quantity, Some(1));
    }

    #[test]
    fn test_increase_and_decrease_stay_in_range() {
        let mut cart = Cart::new();
        cart.add_product(&test_product("tee", 2));

        cart.increase_quantity("tee");
        assert_eq!(cart.line("tee").unwrap().quantity, Some(2));
        cart.increase_quantity("tee"); // already at stock
        assert_eq!(cart.line("tee").unwrap().quantity, Some(2));

        cart.decrease_quantity("tee");
        assert_eq!(cart.line("tee").unwrap().quantity, Some(1));
        cart.decrease_quantity("tee"); // never below 1
        assert_eq!(cart.line("tee").unwrap().quantity, Some(1));
    }

    #[test]
    fn test_draft_counts_as_zero_in_derived_totals() {
        let mut cart = Cart::new();
        cart.add_product(&test_product("tee", 9));
        cart.add_product(&test_product("mug", 9));
        cart.set_quantity("tee", "3", false);
        cart.set_quantity("mug", "", false); // draft

        assert_eq!(cart.count(), 3);
        assert_eq!(cart.total(), Money::from_cents(3 * 3500));
    }

    #[test]
    fn test_repair_settles_drafts_and_clamps() {
        let mut items = vec![
            CartLineItem::from_product(&test_product("tee", 3)),
            CartLineItem::from_product(&test_product("mug", 3)),
        ];
        items[0].quantity = None; // persisted mid-edit
        items[1].quantity = Some(50); // stale payload beyond stock

        let cart = Cart::from_items(items);
        assert_eq!(cart.items()[0].quantity, Some(1));
        assert_eq!(cart.items()[1].quantity, Some(3));
    }

    #[test]
    fn test_line_item_deserializes_null_quantity_as_draft() {
        let json = r#"{
            "productId": "tee",
            "title": "Basic Tee",
            "imagePath": "/img/tee.jpg",
            "unitPrice": 3500,
            "availableStock": 3,
            "quantity": null
        }"#;

        let item: CartLineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.quantity, None);

        let cart = Cart::from_items(vec![item]);
        assert_eq!(cart.items()[0].quantity, Some(1));
    }
}
