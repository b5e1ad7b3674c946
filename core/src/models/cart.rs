// core/src/models/cart.rs

use super::product::Product;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// One per user, created on the first add-to-cart.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Cart {
  pub id: Uuid,
  pub user_id: Uuid,
  pub created_at: DateTime<Utc>,
}

/// A stored line. At most one per (cart, product); `quantity` is always >= 1.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct CartItem {
  pub id: Uuid,
  pub cart_id: Uuid,
  pub product_id: Uuid,
  pub quantity: i32,
  pub added_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// A cart item joined with its product snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
  pub id: Uuid,
  pub product: Product,
  pub quantity: i32,
  pub line_total_cents: i64,
}

impl CartLine {
  pub fn new(item: CartItem, product: Product) -> Self {
    let line_total_cents = i64::from(product.price_cents) * i64::from(item.quantity);
    Self {
      id: item.id,
      product,
      quantity: item.quantity,
      line_total_cents,
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct CartView {
  /// `None` when the user has no cart yet.
  pub cart_id: Option<Uuid>,
  pub items: Vec<CartLine>,
  pub total_cents: i64,
}

impl CartView {
  pub fn empty() -> Self {
    Self {
      cart_id: None,
      items: Vec::new(),
      total_cents: 0,
    }
  }

  pub fn new(cart_id: Uuid, items: Vec<CartLine>) -> Self {
    let total_cents = items.iter().map(|line| line.line_total_cents).sum();
    Self {
      cart_id: Some(cart_id),
      items,
      total_cents,
    }
  }
}
