// core/src/store/memory.rs

//! Process-local backend. All relations sit behind one `parking_lot::Mutex`, so every
//! trait call observes and mutates a consistent snapshot, the same guarantee the
//! Postgres backend gets from unique constraints and transactions.
//!
//! The lock is never held across an `.await`.

use super::{CartStore, InteractionStore, ProductCatalog};
use crate::error::{ShopError, ShopResult};
use crate::identity::UserId;
use crate::models::{Cart, CartItem, Favorite, Like, Product, ProductFilter, Rating, RatingSummary};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::{event, Level};
use uuid::Uuid;

#[derive(Debug, Default)]
struct MemoryState {
  products: HashMap<Uuid, Product>,
  carts: HashMap<UserId, Cart>,
  cart_items: Vec<CartItem>,
  likes: Vec<Like>,
  favorites: Vec<Favorite>,
  ratings: Vec<Rating>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
  state: Mutex<MemoryState>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert_product(&self, product: Product) {
    self.state.lock().products.insert(product.id, product);
  }

  /// Records a rating, replacing the user's earlier one for the product.
  pub fn insert_rating(&self, user_id: UserId, product_id: Uuid, score: i32, review: impl Into<String>) -> Rating {
    let rating = Rating {
      id: Uuid::new_v4(),
      user_id,
      product_id,
      score,
      review: review.into(),
      created_at: Utc::now(),
    };
    let mut state = self.state.lock();
    state
      .ratings
      .retain(|r| !(r.user_id == user_id && r.product_id == product_id));
    state.ratings.push(rating.clone());
    rating
  }
}

/// Test support: row inspection and direct writes that bypass the store traits.
/// Application code goes through `CartStore` and `InteractionStore` instead.
impl MemoryStore {
  /// Adds a favorite without a like, the way rows written by other tools sharing the
  /// store can look.
  pub fn insert_favorite(&self, user_id: UserId, product_id: Uuid) {
    let mut state = self.state.lock();
    if !state
      .favorites
      .iter()
      .any(|f| f.user_id == user_id && f.product_id == product_id)
    {
      state.favorites.push(Favorite {
        id: Uuid::new_v4(),
        user_id,
        product_id,
        created_at: Utc::now(),
      });
    }
  }

  pub fn like_rows(&self, user_id: UserId, product_id: Uuid) -> usize {
    let state = self.state.lock();
    state
      .likes
      .iter()
      .filter(|l| l.user_id == user_id && l.product_id == product_id)
      .count()
  }

  pub fn favorite_rows(&self, user_id: UserId, product_id: Uuid) -> usize {
    let state = self.state.lock();
    state
      .favorites
      .iter()
      .filter(|f| f.user_id == user_id && f.product_id == product_id)
      .count()
  }

  pub fn cart_count(&self) -> usize {
    self.state.lock().carts.len()
  }

  pub fn cart_item_rows(&self) -> usize {
    self.state.lock().cart_items.len()
  }
}

#[async_trait]
impl ProductCatalog for MemoryStore {
  async fn get_product(&self, product_id: Uuid) -> ShopResult<Option<Product>> {
    Ok(self.state.lock().products.get(&product_id).cloned())
  }

  async fn get_products(&self, product_ids: &[Uuid]) -> ShopResult<Vec<Product>> {
    let state = self.state.lock();
    Ok(
      product_ids
        .iter()
        .filter_map(|id| state.products.get(id).cloned())
        .collect(),
    )
  }

  async fn list_products(&self, filter: &ProductFilter) -> ShopResult<Vec<Product>> {
    let state = self.state.lock();
    let mut products: Vec<Product> = state
      .products
      .values()
      .filter(|p| filter.matches(p))
      .cloned()
      .collect();
    products.sort_by(|a, b| a.title.cmp(&b.title));
    Ok(products)
  }
}

#[async_trait]
impl CartStore for MemoryStore {
  async fn find_cart(&self, user_id: UserId) -> ShopResult<Option<Cart>> {
    Ok(self.state.lock().carts.get(&user_id).cloned())
  }

  async fn get_or_create_cart(&self, user_id: UserId) -> ShopResult<Cart> {
    let mut state = self.state.lock();
    let cart = state.carts.entry(user_id).or_insert_with(|| {
      event!(Level::DEBUG, %user_id, "Creating cart.");
      Cart {
        id: Uuid::new_v4(),
        user_id,
        created_at: Utc::now(),
      }
    });
    Ok(cart.clone())
  }

  async fn add_item(&self, cart_id: Uuid, product_id: Uuid, quantity: i32) -> ShopResult<CartItem> {
    let mut state = self.state.lock();
    let now = Utc::now();

    if let Some(item) = state
      .cart_items
      .iter_mut()
      .find(|i| i.cart_id == cart_id && i.product_id == product_id)
    {
      item.quantity = item
        .quantity
        .checked_add(quantity)
        .ok_or_else(|| ShopError::Validation("Cart item quantity is too large.".to_string()))?;
      item.updated_at = now;
      return Ok(item.clone());
    }

    let item = CartItem {
      id: Uuid::new_v4(),
      cart_id,
      product_id,
      quantity,
      added_at: now,
      updated_at: now,
    };
    state.cart_items.push(item.clone());
    Ok(item)
  }

  async fn remove_item(&self, cart_id: Uuid, product_id: Uuid) -> ShopResult<bool> {
    let mut state = self.state.lock();
    let before = state.cart_items.len();
    state
      .cart_items
      .retain(|i| !(i.cart_id == cart_id && i.product_id == product_id));
    Ok(state.cart_items.len() < before)
  }

  async fn list_items(&self, cart_id: Uuid) -> ShopResult<Vec<CartItem>> {
    let state = self.state.lock();
    Ok(
      state
        .cart_items
        .iter()
        .filter(|i| i.cart_id == cart_id)
        .cloned()
        .collect(),
    )
  }
}

#[async_trait]
impl InteractionStore for MemoryStore {
  async fn like(&self, user_id: UserId, product_id: Uuid) -> ShopResult<bool> {
    let mut state = self.state.lock();
    let now = Utc::now();

    let created = !state
      .likes
      .iter()
      .any(|l| l.user_id == user_id && l.product_id == product_id);
    if created {
      state.likes.push(Like {
        id: Uuid::new_v4(),
        user_id,
        product_id,
        created_at: now,
      });
    }

    if !state
      .favorites
      .iter()
      .any(|f| f.user_id == user_id && f.product_id == product_id)
    {
      state.favorites.push(Favorite {
        id: Uuid::new_v4(),
        user_id,
        product_id,
        created_at: now,
      });
    }
    Ok(created)
  }

  async fn unlike(&self, user_id: UserId, product_id: Uuid) -> ShopResult<()> {
    let mut state = self.state.lock();
    state
      .likes
      .retain(|l| !(l.user_id == user_id && l.product_id == product_id));
    state
      .favorites
      .retain(|f| !(f.user_id == user_id && f.product_id == product_id));
    Ok(())
  }

  async fn is_liked(&self, user_id: UserId, product_id: Uuid) -> ShopResult<bool> {
    Ok(self.like_rows(user_id, product_id) > 0)
  }

  async fn is_favorited(&self, user_id: UserId, product_id: Uuid) -> ShopResult<bool> {
    Ok(self.favorite_rows(user_id, product_id) > 0)
  }

  async fn list_favorites(&self, user_id: UserId) -> ShopResult<Vec<Favorite>> {
    let state = self.state.lock();
    Ok(
      state
        .favorites
        .iter()
        .filter(|f| f.user_id == user_id)
        .cloned()
        .collect(),
    )
  }

  async fn user_rating(&self, user_id: UserId, product_id: Uuid) -> ShopResult<Option<Rating>> {
    let state = self.state.lock();
    Ok(
      state
        .ratings
        .iter()
        .find(|r| r.user_id == user_id && r.product_id == product_id)
        .cloned(),
    )
  }

  async fn rating_summary(&self, product_id: Uuid) -> ShopResult<RatingSummary> {
    let state = self.state.lock();
    let scores: Vec<i32> = state
      .ratings
      .iter()
      .filter(|r| r.product_id == product_id)
      .map(|r| r.score)
      .collect();
    Ok(RatingSummary::from_scores(&scores))
  }
}
