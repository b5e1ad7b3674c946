// core/src/models/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type as SqlxType};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, SqlxType)]
#[sqlx(type_name = "product_size_enum", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ProductSize {
  Small,
  Medium,
  Large,
  XLarge,
  XxLarge,
}

/// A catalog entry. The storefront core only ever reads these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
  pub id: Uuid,
  pub category_id: Option<Uuid>,
  pub title: String,
  pub description: String,
  pub price_cents: i32,
  pub size: Option<ProductSize>,
  pub color: String,
  pub stock_quantity: i32,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Product {
  pub fn new(title: impl Into<String>, price_cents: i32) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      category_id: None,
      title: title.into(),
      description: String::new(),
      price_cents,
      size: None,
      color: String::new(),
      stock_quantity: 0,
      created_at: now,
      updated_at: now,
    }
  }

  pub fn with_category(mut self, category_id: Uuid) -> Self {
    self.category_id = Some(category_id);
    self
  }

  pub fn with_stock(mut self, stock_quantity: i32) -> Self {
    self.stock_quantity = stock_quantity;
    self
  }
}

/// Catalog listing filter. Both criteria are optional and combine with AND.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductFilter {
  pub category_id: Option<Uuid>,
  /// Case-insensitive substring match on the title.
  pub search: Option<String>,
}

impl ProductFilter {
  /// Blank search terms are treated as absent.
  pub fn search_term(&self) -> Option<&str> {
    self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
  }

  pub fn matches(&self, product: &Product) -> bool {
    if let Some(category_id) = self.category_id {
      if product.category_id != Some(category_id) {
        return false;
      }
    }
    match self.search_term() {
      Some(term) => product.title.to_lowercase().contains(&term.to_lowercase()),
      None => true,
    }
  }
}

/// Product snapshot as seen by a (possibly anonymous) viewer.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetail {
  #[serde(flatten)]
  pub product: Product,
  pub avg_rate: Option<f64>,
  pub tot_rate: i64,
  pub is_liked: bool,
  pub is_favorited: bool,
  pub is_rated: bool,
}
