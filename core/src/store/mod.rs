// core/src/store/mod.rs

//! Persistence seams for the storefront.
//!
//! Every method is a single atomic unit against the backing store. Uniqueness on
//! (cart, product) and (user, product) is owned by the store, so services never do
//! check-then-write sequences that could race.

pub mod memory;
pub mod postgres;

use crate::error::ShopResult;
use crate::identity::UserId;
use crate::models::{Cart, CartItem, Favorite, Product, ProductFilter, Rating, RatingSummary};
use async_trait::async_trait;
use uuid::Uuid;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Read-only product lookup.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
  async fn get_product(&self, product_id: Uuid) -> ShopResult<Option<Product>>;

  /// Products for the given ids, in no particular order. Unknown ids are skipped.
  async fn get_products(&self, product_ids: &[Uuid]) -> ShopResult<Vec<Product>>;

  /// Products matching `filter`, ordered by title.
  async fn list_products(&self, filter: &ProductFilter) -> ShopResult<Vec<Product>>;
}

#[async_trait]
pub trait CartStore: Send + Sync {
  /// Never creates a cart.
  async fn find_cart(&self, user_id: UserId) -> ShopResult<Option<Cart>>;

  /// Returns the user's cart, creating it if this is the first write.
  async fn get_or_create_cart(&self, user_id: UserId) -> ShopResult<Cart>;

  /// Inserts the line or adds `quantity` to the existing one, atomically.
  async fn add_item(&self, cart_id: Uuid, product_id: Uuid, quantity: i32) -> ShopResult<CartItem>;

  /// Returns whether a line was removed.
  async fn remove_item(&self, cart_id: Uuid, product_id: Uuid) -> ShopResult<bool>;

  /// Lines in insertion order.
  async fn list_items(&self, cart_id: Uuid) -> ShopResult<Vec<CartItem>>;
}

#[async_trait]
pub trait InteractionStore: Send + Sync {
  /// Ensures both a Like and a Favorite exist for the pair, in one transaction.
  /// Returns whether the Like was newly created.
  async fn like(&self, user_id: UserId, product_id: Uuid) -> ShopResult<bool>;

  /// Deletes the Like and the Favorite for the pair, in one transaction. Absent rows are fine.
  async fn unlike(&self, user_id: UserId, product_id: Uuid) -> ShopResult<()>;

  async fn is_liked(&self, user_id: UserId, product_id: Uuid) -> ShopResult<bool>;

  async fn is_favorited(&self, user_id: UserId, product_id: Uuid) -> ShopResult<bool>;

  /// Favorites of the user, oldest first.
  async fn list_favorites(&self, user_id: UserId) -> ShopResult<Vec<Favorite>>;

  async fn user_rating(&self, user_id: UserId, product_id: Uuid) -> ShopResult<Option<Rating>>;

  async fn rating_summary(&self, product_id: Uuid) -> ShopResult<RatingSummary>;
}
