// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper

use once_cell::sync::Lazy;
use shopfront::models::Product;
use shopfront::{CartService, CatalogService, InteractionService, MemoryStore};
use std::sync::Arc;
use tracing::Level;
use uuid::Uuid;

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

/// Services wired over one shared in-memory store.
pub struct Shop {
  pub store: Arc<MemoryStore>,
  pub carts: CartService,
  pub interactions: InteractionService,
  pub catalog: CatalogService,
}

impl Shop {
  pub fn new() -> Self {
    setup_tracing();
    let store = Arc::new(MemoryStore::new());
    Self {
      carts: CartService::new(store.clone(), store.clone()),
      interactions: InteractionService::new(store.clone(), store.clone()),
      catalog: CatalogService::new(store.clone(), store.clone()),
      store,
    }
  }

  /// Adds a product to the catalog and returns it.
  pub fn stock(&self, title: &str, price_cents: i32) -> Product {
    let product = Product::new(title, price_cents).with_stock(10);
    self.store.insert_product(product.clone());
    product
  }
}

pub fn user() -> Uuid {
  Uuid::new_v4()
}
