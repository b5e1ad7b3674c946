// tests/cart_service_tests.rs
mod common;

use common::*;
use shopfront::ShopError;
use std::sync::Arc;
use uuid::Uuid;

#[tokio::test]
async fn test_add_item_creates_cart_and_line() {
  let shop = Shop::new();
  let mug = shop.stock("Mug", 1200);
  let alice = user();

  let line = shop.carts.add_item(alice, mug.id, Some(2)).await.unwrap();

  assert_eq!(line.product.id, mug.id);
  assert_eq!(line.quantity, 2);
  assert_eq!(line.line_total_cents, 2400);
  assert_eq!(shop.store.cart_count(), 1);
}

#[tokio::test]
async fn test_add_item_defaults_quantity_to_one() {
  let shop = Shop::new();
  let mug = shop.stock("Mug", 1200);

  let line = shop.carts.add_item(user(), mug.id, None).await.unwrap();
  assert_eq!(line.quantity, 1);
}

#[tokio::test]
async fn test_repeated_add_merges_quantity() {
  let shop = Shop::new();
  let product = shop.stock("Tee", 1500);
  let alice = user();

  let first = shop.carts.add_item(alice, product.id, Some(2)).await.unwrap();
  let second = shop.carts.add_item(alice, product.id, Some(3)).await.unwrap();

  assert_eq!(first.id, second.id, "merge must keep the same line");
  assert_eq!(second.quantity, 5);

  let view = shop.carts.list_cart(alice).await.unwrap();
  assert_eq!(view.items.len(), 1);
  assert_eq!(view.items[0].quantity, 5);
  assert_eq!(view.items[0].line_total_cents, 1500 * 5);
  assert_eq!(view.total_cents, 1500 * 5);
  assert_eq!(shop.store.cart_item_rows(), 1);
}

#[tokio::test]
async fn test_add_unknown_product_is_not_found_and_writes_nothing() {
  let shop = Shop::new();
  let alice = user();

  let result = shop.carts.add_item(alice, Uuid::new_v4(), Some(1)).await;

  assert!(matches!(result, Err(ShopError::NotFound(_))));
  assert_eq!(shop.store.cart_item_rows(), 0);
  assert_eq!(shop.store.cart_count(), 0);
}

#[tokio::test]
async fn test_add_rejects_non_positive_quantity() {
  let shop = Shop::new();
  let mug = shop.stock("Mug", 1200);

  let result = shop.carts.add_item(user(), mug.id, Some(0)).await;
  assert!(matches!(result, Err(ShopError::Validation(_))));
  assert_eq!(shop.store.cart_item_rows(), 0);
}

#[tokio::test]
async fn test_merge_past_integer_range_is_validation() {
  let shop = Shop::new();
  let mug = shop.stock("Mug", 1200);
  let alice = user();

  shop.carts.add_item(alice, mug.id, Some(i32::MAX)).await.unwrap();

  match shop.carts.add_item(alice, mug.id, Some(1)).await {
    Err(ShopError::Validation(msg)) => assert_eq!(msg, "Cart item quantity is too large."),
    other => panic!("Expected Validation, got {:?}", other),
  }
  assert_eq!(shop.carts.list_cart(alice).await.unwrap().items[0].quantity, i32::MAX);
}

#[tokio::test]
async fn test_remove_item_deletes_whole_line() {
  let shop = Shop::new();
  let mug = shop.stock("Mug", 1200);
  let alice = user();

  shop.carts.add_item(alice, mug.id, Some(4)).await.unwrap();
  shop.carts.remove_item(alice, mug.id).await.unwrap();

  let view = shop.carts.list_cart(alice).await.unwrap();
  assert!(view.items.is_empty());
  assert!(view.cart_id.is_some(), "the cart itself survives");

  match shop.carts.remove_item(alice, mug.id).await {
    Err(ShopError::ItemNotFound { product_id }) => assert_eq!(product_id, mug.id),
    other => panic!("Expected ItemNotFound, got {:?}", other),
  }
}

#[tokio::test]
async fn test_remove_without_cart_is_empty_cart() {
  let shop = Shop::new();
  let mug = shop.stock("Mug", 1200);

  let result = shop.carts.remove_item(user(), mug.id).await;
  assert!(matches!(result, Err(ShopError::EmptyCart)));
}

#[tokio::test]
async fn test_list_cart_does_not_create_cart() {
  let shop = Shop::new();

  let view = shop.carts.list_cart(user()).await.unwrap();

  assert!(view.cart_id.is_none());
  assert!(view.items.is_empty());
  assert_eq!(view.total_cents, 0);
  assert_eq!(shop.store.cart_count(), 0);
}

#[tokio::test]
async fn test_carts_are_per_user() {
  let shop = Shop::new();
  let mug = shop.stock("Mug", 1200);
  let (alice, bob) = (user(), user());

  shop.carts.add_item(alice, mug.id, Some(1)).await.unwrap();
  shop.carts.add_item(bob, mug.id, Some(6)).await.unwrap();

  assert_eq!(shop.store.cart_count(), 2);
  assert_eq!(shop.carts.list_cart(alice).await.unwrap().items[0].quantity, 1);
  assert_eq!(shop.carts.list_cart(bob).await.unwrap().items[0].quantity, 6);
  assert!(matches!(
    shop.carts.remove_item(alice, Uuid::new_v4()).await,
    Err(ShopError::ItemNotFound { .. })
  ));
}

#[tokio::test]
async fn test_list_cart_totals_multiple_lines() {
  let shop = Shop::new();
  let mug = shop.stock("Mug", 1200);
  let tee = shop.stock("Tee", 1500);
  let alice = user();

  shop.carts.add_item(alice, mug.id, Some(2)).await.unwrap();
  shop.carts.add_item(alice, tee.id, Some(1)).await.unwrap();

  let view = shop.carts.list_cart(alice).await.unwrap();
  assert_eq!(view.items.len(), 2);
  assert_eq!(view.items[0].product.id, mug.id);
  assert_eq!(view.items[1].product.id, tee.id);
  assert_eq!(view.total_cents, 2 * 1200 + 1500);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_are_not_lost() {
  let shop = Arc::new(Shop::new());
  let product_id = shop.stock("Mug", 1200).id;
  let alice = user();

  let mut handles = Vec::new();
  for _ in 0..32 {
    let shop = shop.clone();
    handles.push(tokio::spawn(async move {
      shop.carts.add_item(alice, product_id, Some(2)).await.unwrap();
    }));
  }
  for handle in handles {
    handle.await.unwrap();
  }

  let view = shop.carts.list_cart(alice).await.unwrap();
  assert_eq!(view.items.len(), 1);
  assert_eq!(view.items[0].quantity, 64);
  assert_eq!(shop.store.cart_count(), 1);
}
