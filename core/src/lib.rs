// src/lib.rs

//! Shopfront: the cart and product-interaction core of a storefront backend.
//!
//! - Carts are created lazily on the first add, one per user.
//! - Adding a product already in the cart merges quantities into the existing line.
//! - Liking a product also favorites it; unliking removes both.
//! - Identity is resolved outside the core and passed explicitly into every call.
//!
//! Persistence goes through the `store` traits, backed by PostgreSQL in production and
//! by an in-memory store for tests and local runs.

pub mod error;
pub mod identity;
pub mod models;
pub mod services;
pub mod store;

pub use crate::error::{ShopError, ShopResult};
pub use crate::identity::{HeaderIdentityProvider, IdentityProvider, UserId};
pub use crate::services::{CartService, CatalogService, InteractionService};
pub use crate::store::{CartStore, InteractionStore, MemoryStore, PgStore, ProductCatalog};
