// core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ShopError {
  /// A referenced product, cart or other record does not exist.
  #[error("Resource Not Found: {0}")]
  NotFound(String),

  /// The operation needs a cart, but the user has never added anything.
  #[error("Cart is empty")]
  EmptyCart,

  /// The cart exists but holds no line for the product.
  #[error("No cart item for product {product_id}")]
  ItemNotFound { product_id: Uuid },

  #[error("Unauthorized: {0}")]
  Unauthorized(String),

  #[error("Validation Error: {0}")]
  Validation(String),

  /// Failure inside a store backend. Never retried here; the caller decides.
  #[error("Store operation failed. Source: {source}")]
  Store {
    #[source]
    source: AnyhowError,
  },
}

impl ShopError {
  pub fn product_not_found(product_id: Uuid) -> Self {
    ShopError::NotFound(format!("Product with ID {} not found.", product_id))
  }
}

impl From<sqlx::Error> for ShopError {
  fn from(err: sqlx::Error) -> Self {
    ShopError::Store {
      source: AnyhowError::new(err),
    }
  }
}

impl From<AnyhowError> for ShopError {
  fn from(err: AnyhowError) -> Self {
    ShopError::Store { source: err }
  }
}

pub type ShopResult<T, E = ShopError> = std::result::Result<T, E>;
