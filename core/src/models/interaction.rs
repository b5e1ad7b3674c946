// core/src/models/interaction.rs

use super::product::Product;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Like {
  pub id: Uuid,
  pub user_id: Uuid,
  pub product_id: Uuid,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Favorite {
  pub id: Uuid,
  pub user_id: Uuid,
  pub product_id: Uuid,
  pub created_at: DateTime<Utc>,
}

/// A favorite together with the product it points at.
#[derive(Debug, Clone, Serialize)]
pub struct FavoriteEntry {
  pub id: Uuid,
  pub user_id: Uuid,
  pub product: Product,
  pub favorited_at: DateTime<Utc>,
}

impl FavoriteEntry {
  pub fn new(favorite: Favorite, product: Product) -> Self {
    Self {
      id: favorite.id,
      user_id: favorite.user_id,
      product,
      favorited_at: favorite.created_at,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Rating {
  pub id: Uuid,
  pub user_id: Uuid,
  pub product_id: Uuid,
  pub score: i32,
  pub review: String,
  pub created_at: DateTime<Utc>,
}

/// Aggregated ratings of one product.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RatingSummary {
  /// Mean score rounded to one decimal, `None` while unrated.
  pub avg_rate: Option<f64>,
  pub tot_rate: i64,
}

impl RatingSummary {
  pub fn from_scores(scores: &[i32]) -> Self {
    if scores.is_empty() {
      return Self::default();
    }
    let sum: i64 = scores.iter().map(|s| i64::from(*s)).sum();
    let mean = sum as f64 / scores.len() as f64;
    Self {
      avg_rate: Some((mean * 10.0).round() / 10.0),
      tot_rate: scores.len() as i64,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LikeOutcome {
  /// False when the product was already liked.
  pub created: bool,
}

/// Confirmation for operations with no other payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ack {
  pub message: String,
}

impl Ack {
  pub fn new(message: impl Into<String>) -> Self {
    Self { message: message.into() }
  }
}
