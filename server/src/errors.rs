// server/src/errors.rs

use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use shopfront::ShopError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error(transparent)]
  Shop(#[from] ShopError),

  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl ResponseError for AppError {
  fn error_response(&self) -> HttpResponse {
    match self {
      AppError::Shop(ShopError::NotFound(m)) => HttpResponse::NotFound().json(json!({"error": m})),
      AppError::Shop(err @ ShopError::ItemNotFound { .. }) => {
        HttpResponse::NotFound().json(json!({"error": "there is no item to delete", "detail": err.to_string()}))
      }
      AppError::Shop(ShopError::EmptyCart) => HttpResponse::BadRequest().json(json!({"error": "cart is empty"})),
      AppError::Shop(ShopError::Validation(m)) | AppError::Validation(m) => {
        HttpResponse::BadRequest().json(json!({"error": m}))
      }
      AppError::Shop(ShopError::Unauthorized(m)) => HttpResponse::Unauthorized().json(json!({"error": m})),
      AppError::Shop(ShopError::Store { source }) => {
        // Store details stay in the logs.
        tracing::error!(error = %source, "Store failure");
        HttpResponse::InternalServerError().json(json!({"error": "Database operation failed"}))
      }
      AppError::Config(m) => {
        tracing::error!(application_error = %self, "Responding with error");
        HttpResponse::InternalServerError().json(json!({"error": "Configuration issue", "detail": m}))
      }
      AppError::Internal(m) => {
        tracing::error!(application_error = %self, "Responding with error");
        HttpResponse::InternalServerError().json(json!({"error": "An internal error occurred", "detail": m}))
      }
    }
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
