// server/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::auth::AuthenticatedUser;

// --- Request DTOs ---
#[derive(Deserialize, Debug)]
pub struct AddToCartRequestPayload {
  pub product_id: Uuid,
  // Defaults to one when omitted.
  pub quantity: Option<i32>,
}

#[derive(Deserialize, Debug)]
pub struct RemoveItemRequestPayload {
  pub product_id: Uuid,
}

// --- Handler Implementations ---

#[instrument(
    name = "handler::add_to_cart",
    skip(app_state, req_payload, auth_user),
    fields(user_id = %auth_user.user_id, product_id = %req_payload.product_id, quantity = ?req_payload.quantity)
)]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<AddToCartRequestPayload>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let line = app_state
    .cart_service
    .add_item(auth_user.user_id, req_payload.product_id, req_payload.quantity)
    .await?;

  info!(
    "Add to cart successful for user: {}. Item ID: {}, New Quantity: {}",
    auth_user.user_id, line.id, line.quantity
  );
  Ok(HttpResponse::Ok().json(json!({
      "message": "Item added to cart successfully.",
      "cartItem": line
  })))
}

#[instrument(
    name = "handler::remove_from_cart",
    skip(app_state, req_payload, auth_user),
    fields(user_id = %auth_user.user_id, product_id = %req_payload.product_id)
)]
pub async fn remove_from_cart_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<RemoveItemRequestPayload>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let ack = app_state
    .cart_service
    .remove_item(auth_user.user_id, req_payload.product_id)
    .await?;
  Ok(HttpResponse::Ok().json(json!({ "message": ack.message })))
}

#[instrument(name = "handler::view_cart", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn view_cart_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let cart = app_state.cart_service.list_cart(auth_user.user_id).await?;
  info!("Cart for user {} has {} items.", auth_user.user_id, cart.items.len());
  Ok(HttpResponse::Ok().json(json!({
      "message": "Cart fetched successfully.",
      "cart": cart
  })))
}
