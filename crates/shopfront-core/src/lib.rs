//! # shopfront-core: Pure Client Logic for Shopfront
//!
//! The reactive heart of the storefront client: a locale-aware form
//! validation engine and the cart arithmetic behind the shopping cart
//! store, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Shopfront Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 UI Components (out of scope)                    │   │
//! │  │    Listing pages ──► Cart drawer ──► Auth forms                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  shopfront-store                                │   │
//! │  │    CartStore (persisted) • ProductStore (catalog cache)        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ shopfront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌──────────┐ ┌────────┐ ┌────────┐ ┌─────────┐  │   │
//! │  │   │  rules  │ │ resolver │ │  form  │ │  cart  │ │  money  │  │   │
//! │  │   │registry │ │ RuleSpec │ │ engine │ │  math  │ │  cents  │  │   │
//! │  │   └─────────┘ └──────────┘ └────────┘ └────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`locale`] - Locales and per-locale validation message tables
//! - [`rules`] - The rule registry: pure, localized validator functions
//! - [`resolver`] - Declarative rule specifiers resolved into validators
//! - [`form`] - The per-field / whole-form validation engine
//! - [`cart`] - Cart aggregate: line items, quantity clamping, repair
//! - [`product`] - Catalog product and pagination envelope types
//! - [`money`] - Integer-cents money type (no floating point!)
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, everywhere
//! 2. **No I/O**: storage and network access is FORBIDDEN here
//! 3. **Explicit Locale**: the active locale is always a parameter
//! 4. **Degrade, Never Panic**: a broken rule reference or an invalid
//!    persisted payload becomes a visible message or a repaired value

pub mod cart;
pub mod form;
pub mod locale;
pub mod money;
pub mod product;
pub mod resolver;
pub mod rules;

// Re-exports for convenience, so callers can `use shopfront_core::Cart`
// instead of spelling out the module path.

pub use cart::{Cart, CartLineItem};
pub use form::{FieldDecl, FieldState, FormSession};
pub use locale::Locale;
pub use money::Money;
pub use product::{PageLinks, PageMeta, Product, ProductEnvelope, ProductPage};
pub use resolver::{FormValues, RuleArg, RuleSpec, Validator};
