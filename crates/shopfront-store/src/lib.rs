//! # shopfront-store: Stateful Stores for Shopfront
//!
//! The layer that gives the pure logic in `shopfront-core` a memory: the
//! persisted cart store, the key-value storage slot it writes through, and
//! the product catalog cache behind an asynchronous API boundary.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Store Data Flow                                  │
//! │                                                                         │
//! │   UI event            Store                    Boundary                 │
//! │   ────────            ─────                    ────────                 │
//! │                                                                         │
//! │   add to cart ──────► CartStore ─────────────► KeyValueStorage          │
//! │   change qty          (Cart math from          (write-through after     │
//! │   remove/clear         shopfront-core)          every mutation)         │
//! │                            ▲                        │                   │
//! │                            └── rehydrate + repair ◄─┘  (once, startup)  │
//! │                                                                         │
//! │   open listing ─────► ProductStore ──────────► CatalogApi (async)       │
//! │                       loading / error /                                 │
//! │                       last-known-good cache                             │
//! │                            │                                            │
//! │   add by id ──────────────► find(id) feeds CartStore::add_item          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Mutations are synchronous: when a cart call returns, the state is
//! already recomputed and already persisted. Only the catalog boundary is
//! async, and it never blocks the cart.

pub mod cart;
pub mod catalog;
pub mod error;
pub mod storage;

pub use cart::{CartStore, CART_STORAGE_KEY};
pub use catalog::{CatalogApi, ProductStore};
pub use error::CatalogError;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
