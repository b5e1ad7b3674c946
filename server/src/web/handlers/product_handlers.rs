// server/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use shopfront::models::ProductFilter;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::auth::{AuthenticatedUser, MaybeAuthenticatedUser};

#[derive(Deserialize, Debug)]
pub struct ListProductsQuery {
  pub category: Option<Uuid>,
  pub search: Option<String>,
}

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<ListProductsQuery>,
) -> Result<HttpResponse, AppError> {
  let query = query_params.into_inner();
  let filter = ProductFilter {
    category_id: query.category,
    search: query.search,
  };

  let products = app_state.catalog_service.list_products(&filter).await?;
  info!("Successfully fetched {} products.", products.len());

  Ok(HttpResponse::Ok().json(json!({
      "message": "Products fetched successfully.",
      "products": products
  })))
}

#[instrument(name = "handler::get_product", skip(app_state, path, viewer), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  viewer: MaybeAuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();
  let detail = app_state
    .catalog_service
    .product_detail(viewer.user_id(), product_id)
    .await?;

  Ok(HttpResponse::Ok().json(json!({
      "message": "Product fetched successfully.",
      "product": detail
  })))
}

#[instrument(
    name = "handler::like_product",
    skip(app_state, path, auth_user),
    fields(user_id = %auth_user.user_id, product_id = %path.as_ref())
)]
pub async fn like_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let outcome = app_state
    .interaction_service
    .like(auth_user.user_id, path.into_inner())
    .await?;

  let mut response = if outcome.created {
    HttpResponse::Created()
  } else {
    HttpResponse::Ok()
  };
  Ok(response.json(json!({ "created": outcome.created })))
}

#[instrument(
    name = "handler::unlike_product",
    skip(app_state, path, auth_user),
    fields(user_id = %auth_user.user_id, product_id = %path.as_ref())
)]
pub async fn unlike_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let ack = app_state
    .interaction_service
    .unlike(auth_user.user_id, path.into_inner())
    .await?;
  Ok(HttpResponse::Ok().json(json!({ "message": ack.message })))
}
