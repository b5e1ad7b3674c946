// core/src/store/postgres.rs

//! PostgreSQL backend over a shared `sqlx::PgPool`, using runtime-checked queries.
//!
//! Concurrency rests on the unique constraints in `schema.sql`: add-to-cart is a single
//! `INSERT .. ON CONFLICT .. DO UPDATE` that increments in place, and like/unlike touch
//! `likes` and `favorites` inside one transaction.

use super::{CartStore, InteractionStore, ProductCatalog};
use crate::error::{ShopError, ShopResult};
use crate::identity::UserId;
use crate::models::{Cart, CartItem, Favorite, Product, ProductFilter, ProductSize, Rating, RatingSummary};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

const SCHEMA_SQL: &str = include_str!("../../schema.sql");

/// SQLSTATE `numeric_value_out_of_range`.
const NUMERIC_OUT_OF_RANGE: &str = "22003";

#[derive(Debug, Clone)]
pub struct PgStore {
  pool: PgPool,
}

impl PgStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  pub fn pool(&self) -> &PgPool {
    &self.pool
  }

  /// Creates missing types, tables and indexes. Safe to run repeatedly.
  #[instrument(name = "PgStore::apply_schema", skip(self), err(Display))]
  pub async fn apply_schema(&self) -> ShopResult<()> {
    sqlx::raw_sql(SCHEMA_SQL).execute(&self.pool).await?;
    info!("Database schema applied.");
    Ok(())
  }

  /// Inserts a small fixed catalog. Rows are keyed by constant ids, so reseeding is a no-op.
  #[instrument(name = "PgStore::seed_demo_catalog", skip(self), err(Display))]
  pub async fn seed_demo_catalog(&self) -> ShopResult<u64> {
    let apparel = Uuid::from_u128(0x5f0c_0000_0000_4000_8000_0000_0000_0001);
    let mut tx = self.pool.begin().await?;

    sqlx::query("INSERT INTO categories (id, name, parent_id) VALUES ($1, $2, NULL) ON CONFLICT (id) DO NOTHING")
      .bind(apparel)
      .bind("Apparel")
      .execute(&mut *tx)
      .await?;

    let demo: [(u128, &str, i32, Option<ProductSize>, &str, i32); 4] = [
      (0x5f0c_0000_0000_4000_8000_0000_0000_0101, "Linen Shirt", 3900, Some(ProductSize::Medium), "white", 25),
      (0x5f0c_0000_0000_4000_8000_0000_0000_0102, "Denim Jacket", 8900, Some(ProductSize::Large), "indigo", 10),
      (0x5f0c_0000_0000_4000_8000_0000_0000_0103, "Wool Scarf", 2400, None, "grey", 40),
      (0x5f0c_0000_0000_4000_8000_0000_0000_0104, "Canvas Tote", 1800, None, "natural", 60),
    ];

    let mut inserted = 0;
    for (id, title, price_cents, size, color, stock) in demo {
      let result = sqlx::query(
        r#"
        INSERT INTO products (id, category_id, title, description, price_cents, size, color, stock_quantity)
        VALUES ($1, $2, $3, '', $4, $5, $6, $7)
        ON CONFLICT (id) DO NOTHING
        "#,
      )
      .bind(Uuid::from_u128(id))
      .bind(apparel)
      .bind(title)
      .bind(price_cents)
      .bind(size)
      .bind(color)
      .bind(stock)
      .execute(&mut *tx)
      .await?;
      inserted += result.rows_affected();
    }

    tx.commit().await?;
    info!(inserted, "Demo catalog seeded.");
    Ok(inserted)
  }
}

/// Merging into an existing line can push `quantity` past `INTEGER`; report that the same way
/// the in-memory backend does instead of as a store failure.
fn map_quantity_overflow(err: sqlx::Error) -> ShopError {
  let out_of_range = err
    .as_database_error()
    .and_then(|db| db.code())
    .is_some_and(|code| code == NUMERIC_OUT_OF_RANGE);
  if out_of_range {
    ShopError::Validation("Cart item quantity is too large.".to_string())
  } else {
    ShopError::from(err)
  }
}

/// Escapes LIKE wildcards so a search term only ever matches literally.
fn escape_like(term: &str) -> String {
  let mut escaped = String::with_capacity(term.len());
  for c in term.chars() {
    if matches!(c, '\\' | '%' | '_') {
      escaped.push('\\');
    }
    escaped.push(c);
  }
  escaped
}

#[async_trait]
impl ProductCatalog for PgStore {
  async fn get_product(&self, product_id: Uuid) -> ShopResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
      "SELECT id, category_id, title, description, price_cents, size, color, stock_quantity, created_at, updated_at \
       FROM products WHERE id = $1",
    )
    .bind(product_id)
    .fetch_optional(&self.pool)
    .await?;
    Ok(product)
  }

  async fn get_products(&self, product_ids: &[Uuid]) -> ShopResult<Vec<Product>> {
    if product_ids.is_empty() {
      return Ok(Vec::new());
    }
    let products = sqlx::query_as::<_, Product>(
      "SELECT id, category_id, title, description, price_cents, size, color, stock_quantity, created_at, updated_at \
       FROM products WHERE id = ANY($1)",
    )
    .bind(product_ids)
    .fetch_all(&self.pool)
    .await?;
    Ok(products)
  }

  async fn list_products(&self, filter: &ProductFilter) -> ShopResult<Vec<Product>> {
    let search = filter.search_term().map(escape_like);
    let products = sqlx::query_as::<_, Product>(
      r#"
      SELECT id, category_id, title, description, price_cents, size, color, stock_quantity, created_at, updated_at
      FROM products
      WHERE ($1::uuid IS NULL OR category_id = $1)
        AND ($2::text IS NULL OR title ILIKE '%' || $2 || '%')
      ORDER BY title ASC
      "#,
    )
    .bind(filter.category_id)
    .bind(search)
    .fetch_all(&self.pool)
    .await?;
    Ok(products)
  }
}

#[async_trait]
impl CartStore for PgStore {
  async fn find_cart(&self, user_id: UserId) -> ShopResult<Option<Cart>> {
    let cart = sqlx::query_as::<_, Cart>("SELECT id, user_id, created_at FROM carts WHERE user_id = $1")
      .bind(user_id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(cart)
  }

  async fn get_or_create_cart(&self, user_id: UserId) -> ShopResult<Cart> {
    // The no-op update makes RETURNING yield the existing row on conflict.
    let cart = sqlx::query_as::<_, Cart>(
      r#"
      INSERT INTO carts (id, user_id, created_at)
      VALUES ($1, $2, NOW())
      ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
      RETURNING id, user_id, created_at
      "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .fetch_one(&self.pool)
    .await?;
    Ok(cart)
  }

  #[instrument(name = "PgStore::add_item", skip(self), err(Display))]
  async fn add_item(&self, cart_id: Uuid, product_id: Uuid, quantity: i32) -> ShopResult<CartItem> {
    let item = sqlx::query_as::<_, CartItem>(
      r#"
      INSERT INTO cart_items (id, cart_id, product_id, quantity, added_at, updated_at)
      VALUES ($1, $2, $3, $4, NOW(), NOW())
      ON CONFLICT (cart_id, product_id) DO UPDATE
      SET quantity = cart_items.quantity + EXCLUDED.quantity, updated_at = NOW()
      RETURNING id, cart_id, product_id, quantity, added_at, updated_at
      "#,
    )
    .bind(Uuid::new_v4())
    .bind(cart_id)
    .bind(product_id)
    .bind(quantity)
    .fetch_one(&self.pool)
    .await
    .map_err(map_quantity_overflow)?;
    Ok(item)
  }

  async fn remove_item(&self, cart_id: Uuid, product_id: Uuid) -> ShopResult<bool> {
    let result = sqlx::query("DELETE FROM cart_items WHERE cart_id = $1 AND product_id = $2")
      .bind(cart_id)
      .bind(product_id)
      .execute(&self.pool)
      .await?;
    Ok(result.rows_affected() > 0)
  }

  async fn list_items(&self, cart_id: Uuid) -> ShopResult<Vec<CartItem>> {
    let items = sqlx::query_as::<_, CartItem>(
      "SELECT id, cart_id, product_id, quantity, added_at, updated_at FROM cart_items \
       WHERE cart_id = $1 ORDER BY added_at ASC, id ASC",
    )
    .bind(cart_id)
    .fetch_all(&self.pool)
    .await?;
    Ok(items)
  }
}

#[async_trait]
impl InteractionStore for PgStore {
  #[instrument(name = "PgStore::like", skip(self), err(Display))]
  async fn like(&self, user_id: UserId, product_id: Uuid) -> ShopResult<bool> {
    let mut tx = self.pool.begin().await?;

    let liked = sqlx::query(
      "INSERT INTO likes (id, user_id, product_id, created_at) VALUES ($1, $2, $3, NOW()) \
       ON CONFLICT (user_id, product_id) DO NOTHING",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(product_id)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
      "INSERT INTO favorites (id, user_id, product_id, created_at) VALUES ($1, $2, $3, NOW()) \
       ON CONFLICT (user_id, product_id) DO NOTHING",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(product_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(liked.rows_affected() == 1)
  }

  #[instrument(name = "PgStore::unlike", skip(self), err(Display))]
  async fn unlike(&self, user_id: UserId, product_id: Uuid) -> ShopResult<()> {
    let mut tx = self.pool.begin().await?;

    sqlx::query("DELETE FROM likes WHERE user_id = $1 AND product_id = $2")
      .bind(user_id)
      .bind(product_id)
      .execute(&mut *tx)
      .await?;
    sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND product_id = $2")
      .bind(user_id)
      .bind(product_id)
      .execute(&mut *tx)
      .await?;

    tx.commit().await?;
    Ok(())
  }

  async fn is_liked(&self, user_id: UserId, product_id: Uuid) -> ShopResult<bool> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM likes WHERE user_id = $1 AND product_id = $2)")
      .bind(user_id)
      .bind(product_id)
      .fetch_one(&self.pool)
      .await?;
    Ok(exists)
  }

  async fn is_favorited(&self, user_id: UserId, product_id: Uuid) -> ShopResult<bool> {
    let exists: bool =
      sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM favorites WHERE user_id = $1 AND product_id = $2)")
        .bind(user_id)
        .bind(product_id)
        .fetch_one(&self.pool)
        .await?;
    Ok(exists)
  }

  async fn list_favorites(&self, user_id: UserId) -> ShopResult<Vec<Favorite>> {
    let favorites = sqlx::query_as::<_, Favorite>(
      "SELECT id, user_id, product_id, created_at FROM favorites WHERE user_id = $1 ORDER BY created_at ASC, id ASC",
    )
    .bind(user_id)
    .fetch_all(&self.pool)
    .await?;
    Ok(favorites)
  }

  async fn user_rating(&self, user_id: UserId, product_id: Uuid) -> ShopResult<Option<Rating>> {
    let rating = sqlx::query_as::<_, Rating>(
      "SELECT id, user_id, product_id, score, review, created_at FROM ratings WHERE user_id = $1 AND product_id = $2",
    )
    .bind(user_id)
    .bind(product_id)
    .fetch_optional(&self.pool)
    .await?;
    Ok(rating)
  }

  async fn rating_summary(&self, product_id: Uuid) -> ShopResult<RatingSummary> {
    let (avg_rate, tot_rate): (Option<f64>, i64) = sqlx::query_as(
      "SELECT ROUND(AVG(score)::numeric, 1)::float8, COUNT(*) FROM ratings WHERE product_id = $1",
    )
    .bind(product_id)
    .fetch_one(&self.pool)
    .await?;
    Ok(RatingSummary { avg_rate, tot_rate })
  }
}
