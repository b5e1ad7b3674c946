// core/src/services/cart_service.rs

//! Cart maintenance with merge semantics: adding a product already in the cart grows
//! the existing line instead of creating a second one.

use crate::error::{ShopError, ShopResult};
use crate::identity::UserId;
use crate::models::{Ack, CartLine, CartView, Product};
use crate::store::{CartStore, ProductCatalog};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Quantity used when the caller does not give one.
pub const DEFAULT_QUANTITY: i32 = 1;

pub struct CartService {
  catalog: Arc<dyn ProductCatalog>,
  carts: Arc<dyn CartStore>,
}

impl CartService {
  pub fn new(catalog: Arc<dyn ProductCatalog>, carts: Arc<dyn CartStore>) -> Self {
    Self { catalog, carts }
  }

  /// Adds `quantity` (default 1) of a product to the user's cart, creating the cart on
  /// first use. Returns the resulting line with its merged quantity.
  #[instrument(name = "cart_service::add_item", skip(self), err(Display))]
  pub async fn add_item(&self, user_id: UserId, product_id: Uuid, quantity: Option<i32>) -> ShopResult<CartLine> {
    let quantity = validate_quantity(quantity)?;

    let product = self.catalog.get_product(product_id).await?.ok_or_else(|| {
      warn!("Add to cart: product {} not found.", product_id);
      ShopError::product_not_found(product_id)
    })?;

    let cart = self.carts.get_or_create_cart(user_id).await?;
    let item = self.carts.add_item(cart.id, product.id, quantity).await?;

    info!(
      "Add to cart: cart item {} (product {}) for user {} now has quantity {}.",
      item.id, product.id, user_id, item.quantity
    );
    Ok(CartLine::new(item, product))
  }

  /// Removes the whole line for a product.
  #[instrument(name = "cart_service::remove_item", skip(self), err(Display))]
  pub async fn remove_item(&self, user_id: UserId, product_id: Uuid) -> ShopResult<Ack> {
    let cart = self.carts.find_cart(user_id).await?.ok_or_else(|| {
      warn!("Remove from cart: user {} has no cart.", user_id);
      ShopError::EmptyCart
    })?;

    if !self.carts.remove_item(cart.id, product_id).await? {
      warn!("Remove from cart: cart {} holds no product {}.", cart.id, product_id);
      return Err(ShopError::ItemNotFound { product_id });
    }

    info!("Remove from cart: product {} removed from cart {}.", product_id, cart.id);
    Ok(Ack::new("item removed from cart"))
  }

  /// The user's cart with product snapshots. Users without a cart get an empty view;
  /// this path never creates one.
  #[instrument(name = "cart_service::list_cart", skip(self), err(Display))]
  pub async fn list_cart(&self, user_id: UserId) -> ShopResult<CartView> {
    let Some(cart) = self.carts.find_cart(user_id).await? else {
      return Ok(CartView::empty());
    };

    let items = self.carts.list_items(cart.id).await?;
    let product_ids: Vec<Uuid> = items.iter().map(|item| item.product_id).collect();
    let mut products: HashMap<Uuid, Product> = self
      .catalog
      .get_products(&product_ids)
      .await?
      .into_iter()
      .map(|p| (p.id, p))
      .collect();

    let mut lines = Vec::with_capacity(items.len());
    for item in items {
      match products.remove(&item.product_id) {
        Some(product) => lines.push(CartLine::new(item, product)),
        // Only reachable when the catalog lost a product the store still references.
        None => warn!("List cart: product {} of cart item {} is gone from the catalog.", item.product_id, item.id),
      }
    }
    Ok(CartView::new(cart.id, lines))
  }
}

fn validate_quantity(quantity: Option<i32>) -> ShopResult<i32> {
  let quantity = quantity.unwrap_or(DEFAULT_QUANTITY);
  if quantity < 1 {
    warn!("Add to cart: invalid quantity ({}) provided.", quantity);
    return Err(ShopError::Validation("Quantity must be a positive number.".to_string()));
  }
  Ok(quantity)
}
