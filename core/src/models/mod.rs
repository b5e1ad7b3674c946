// core/src/models/mod.rs

//! Data structures for catalog, cart and interaction records.

pub mod cart;
pub mod interaction;
pub mod product;

pub use cart::{Cart, CartItem, CartLine, CartView};
pub use interaction::{Ack, Favorite, FavoriteEntry, Like, LikeOutcome, Rating, RatingSummary};
pub use product::{Product, ProductDetail, ProductFilter, ProductSize};
