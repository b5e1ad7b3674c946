// server/src/state.rs
use shopfront::store::{CartStore, InteractionStore, ProductCatalog};
use shopfront::{CartService, CatalogService, IdentityProvider, InteractionService};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub cart_service: Arc<CartService>,
  pub interaction_service: Arc<InteractionService>,
  pub catalog_service: Arc<CatalogService>,
  pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
  /// Wires the services over one backend implementing every store trait.
  pub fn new<S>(store: Arc<S>, identity: Arc<dyn IdentityProvider>) -> Self
  where
    S: ProductCatalog + CartStore + InteractionStore + 'static,
  {
    Self {
      cart_service: Arc::new(CartService::new(store.clone(), store.clone())),
      interaction_service: Arc::new(InteractionService::new(store.clone(), store.clone())),
      catalog_service: Arc::new(CatalogService::new(store.clone(), store)),
      identity,
    }
  }
}
