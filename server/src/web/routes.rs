// server/src/web/routes.rs

use actix_web::{error, web, HttpRequest};

use crate::errors::AppError;
use crate::web::handlers::{cart_handlers, favorite_handlers, product_handlers};

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Malformed bodies, ids and query strings all surface as validation errors.
fn json_error(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
  AppError::Validation(err.to_string()).into()
}

fn path_error(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
  AppError::Validation(err.to_string()).into()
}

fn query_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
  AppError::Validation(err.to_string()).into()
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1")
      .app_data(web::JsonConfig::default().error_handler(json_error))
      .app_data(web::PathConfig::default().error_handler(path_error))
      .app_data(web::QueryConfig::default().error_handler(query_error))
      .route("/health", web::get().to(health_check_handler))
      .service(
        web::scope("/products")
          .route("", web::get().to(product_handlers::list_products_handler))
          .route("/{product_id}", web::get().to(product_handlers::get_product_handler))
          .route("/{product_id}/like", web::post().to(product_handlers::like_product_handler))
          .route("/{product_id}/unlike", web::post().to(product_handlers::unlike_product_handler)),
      )
      .service(web::scope("/favorites").route("", web::get().to(favorite_handlers::list_favorites_handler)))
      .service(
        web::scope("/cart")
          .route("", web::get().to(cart_handlers::view_cart_handler))
          .route("", web::post().to(cart_handlers::add_to_cart_handler))
          .route("/remove-item", web::post().to(cart_handlers::remove_from_cart_handler)),
      ),
  );
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::state::AppState;
  use crate::web::auth::USER_ID_HEADER;
  use actix_web::http::StatusCode;
  use actix_web::{test, App};
  use serde_json::{json, Value};
  use shopfront::models::Product;
  use shopfront::{HeaderIdentityProvider, MemoryStore};
  use std::sync::Arc;
  use uuid::Uuid;

  fn test_state() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), Arc::new(HeaderIdentityProvider));
    (state, store)
  }

  macro_rules! test_app {
    ($state:expr) => {
      test::init_service(
        App::new()
          .app_data(web::Data::new($state))
          .configure(configure_app_routes),
      )
      .await
    };
  }

  #[actix_web::test]
  async fn health_is_public() {
    let (state, _) = test_state();
    let app = test_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/v1/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
  }

  #[actix_web::test]
  async fn cart_requires_identity() {
    let (state, _) = test_state();
    let app = test_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/v1/cart").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(
      &app,
      test::TestRequest::get()
        .uri("/api/v1/cart")
        .insert_header((USER_ID_HEADER, "not-a-uuid"))
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }

  #[actix_web::test]
  async fn add_twice_then_view_cart() {
    let (state, store) = test_state();
    let product = Product::new("Mug", 1200);
    store.insert_product(product.clone());
    let app = test_app!(state);
    let user = Uuid::new_v4().to_string();

    for quantity in [2, 3] {
      let resp = test::call_service(
        &app,
        test::TestRequest::post()
          .uri("/api/v1/cart")
          .insert_header((USER_ID_HEADER, user.as_str()))
          .set_json(json!({ "product_id": product.id, "quantity": quantity }))
          .to_request(),
      )
      .await;
      assert_eq!(resp.status(), StatusCode::OK);
    }

    let body: Value = test::call_and_read_body_json(
      &app,
      test::TestRequest::get()
        .uri("/api/v1/cart")
        .insert_header((USER_ID_HEADER, user.as_str()))
        .to_request(),
    )
    .await;
    let items = body["cart"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 5);
    assert_eq!(items[0]["line_total_cents"], 6000);
  }

  #[actix_web::test]
  async fn add_unknown_product_is_404_and_bad_quantity_is_400() {
    let (state, store) = test_state();
    let product = Product::new("Mug", 1200);
    store.insert_product(product.clone());
    let app = test_app!(state);
    let user = Uuid::new_v4().to_string();

    let resp = test::call_service(
      &app,
      test::TestRequest::post()
        .uri("/api/v1/cart")
        .insert_header((USER_ID_HEADER, user.as_str()))
        .set_json(json!({ "product_id": Uuid::new_v4() }))
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(
      &app,
      test::TestRequest::post()
        .uri("/api/v1/cart")
        .insert_header((USER_ID_HEADER, user.as_str()))
        .set_json(json!({ "product_id": product.id, "quantity": 0 }))
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(
      &app,
      test::TestRequest::post()
        .uri("/api/v1/cart")
        .insert_header((USER_ID_HEADER, user.as_str()))
        .set_json(json!({ "product_id": "nope" }))
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[actix_web::test]
  async fn remove_item_on_empty_cart_then_missing_item() {
    let (state, store) = test_state();
    let product = Product::new("Mug", 1200);
    store.insert_product(product.clone());
    let app = test_app!(state);
    let user = Uuid::new_v4().to_string();

    let remove = || {
      test::TestRequest::post()
        .uri("/api/v1/cart/remove-item")
        .insert_header((USER_ID_HEADER, user.as_str()))
        .set_json(json!({ "product_id": product.id }))
        .to_request()
    };

    let resp = test::call_service(&app, remove()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(
      &app,
      test::TestRequest::post()
        .uri("/api/v1/cart")
        .insert_header((USER_ID_HEADER, user.as_str()))
        .set_json(json!({ "product_id": product.id }))
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, remove()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, remove()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[actix_web::test]
  async fn like_lists_favorite_and_unlike_clears_it() {
    let (state, store) = test_state();
    let product = Product::new("Lamp", 4500);
    store.insert_product(product.clone());
    let app = test_app!(state);
    let user = Uuid::new_v4().to_string();
    let like_uri = format!("/api/v1/products/{}/like", product.id);

    let like = || {
      test::TestRequest::post()
        .uri(&like_uri)
        .insert_header((USER_ID_HEADER, user.as_str()))
        .to_request()
    };
    assert_eq!(test::call_service(&app, like()).await.status(), StatusCode::CREATED);
    assert_eq!(test::call_service(&app, like()).await.status(), StatusCode::OK);

    let favorites = || {
      test::TestRequest::get()
        .uri("/api/v1/favorites")
        .insert_header((USER_ID_HEADER, user.as_str()))
        .to_request()
    };
    let body: Value = test::call_and_read_body_json(&app, favorites()).await;
    assert_eq!(body["favorites"].as_array().unwrap().len(), 1);

    let resp = test::call_service(
      &app,
      test::TestRequest::post()
        .uri(&format!("/api/v1/products/{}/unlike", product.id))
        .insert_header((USER_ID_HEADER, user.as_str()))
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::call_and_read_body_json(&app, favorites()).await;
    assert!(body["favorites"].as_array().unwrap().is_empty());
  }

  #[actix_web::test]
  async fn product_detail_is_public_and_personalised_when_identified() {
    let (state, store) = test_state();
    let product = Product::new("Lamp", 4500);
    store.insert_product(product.clone());
    let app = test_app!(state);
    let user = Uuid::new_v4().to_string();
    let uri = format!("/api/v1/products/{}", product.id);

    let body: Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(body["product"]["title"], "Lamp");
    assert_eq!(body["product"]["is_liked"], false);

    test::call_service(
      &app,
      test::TestRequest::post()
        .uri(&format!("{}/like", uri))
        .insert_header((USER_ID_HEADER, user.as_str()))
        .to_request(),
    )
    .await;

    let body: Value = test::call_and_read_body_json(
      &app,
      test::TestRequest::get()
        .uri(&uri)
        .insert_header((USER_ID_HEADER, user.as_str()))
        .to_request(),
    )
    .await;
    assert_eq!(body["product"]["is_liked"], true);
    assert_eq!(body["product"]["is_favorited"], true);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/v1/products/not-a-uuid").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[actix_web::test]
  async fn product_detail_rejects_malformed_identity() {
    let (state, store) = test_state();
    let product = Product::new("Lamp", 4500);
    store.insert_product(product.clone());
    let app = test_app!(state);

    let resp = test::call_service(
      &app,
      test::TestRequest::get()
        .uri(&format!("/api/v1/products/{}", product.id))
        .insert_header((USER_ID_HEADER, "not-a-uuid"))
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }
}
