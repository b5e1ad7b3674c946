// core/src/services/interaction_service.rs

//! Like and favorite toggling.
//!
//! Liking a product always favorites it too. Unliking removes both rows, including a
//! favorite that was written without a like; `favorited => liked` is not assumed.

use crate::error::{ShopError, ShopResult};
use crate::identity::UserId;
use crate::models::{Ack, FavoriteEntry, LikeOutcome, Product};
use crate::store::{InteractionStore, ProductCatalog};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

pub const UNLIKE_MESSAGE: &str = "unliked product and removed it from favorites";

pub struct InteractionService {
  catalog: Arc<dyn ProductCatalog>,
  interactions: Arc<dyn InteractionStore>,
}

impl InteractionService {
  pub fn new(catalog: Arc<dyn ProductCatalog>, interactions: Arc<dyn InteractionStore>) -> Self {
    Self { catalog, interactions }
  }

  #[instrument(name = "interaction_service::like", skip(self), err(Display))]
  pub async fn like(&self, user_id: UserId, product_id: Uuid) -> ShopResult<LikeOutcome> {
    if self.catalog.get_product(product_id).await?.is_none() {
      warn!("Like: product {} not found.", product_id);
      return Err(ShopError::product_not_found(product_id));
    }

    let created = self.interactions.like(user_id, product_id).await?;
    info!(created, "Like: user {} likes product {}.", user_id, product_id);
    Ok(LikeOutcome { created })
  }

  /// Idempotent; succeeds even if nothing was liked or the product no longer exists.
  #[instrument(name = "interaction_service::unlike", skip(self), err(Display))]
  pub async fn unlike(&self, user_id: UserId, product_id: Uuid) -> ShopResult<Ack> {
    self.interactions.unlike(user_id, product_id).await?;
    info!("Unlike: user {} no longer likes or favorites product {}.", user_id, product_id);
    Ok(Ack::new(UNLIKE_MESSAGE))
  }

  pub async fn is_liked(&self, user_id: UserId, product_id: Uuid) -> ShopResult<bool> {
    self.interactions.is_liked(user_id, product_id).await
  }

  pub async fn is_favorited(&self, user_id: UserId, product_id: Uuid) -> ShopResult<bool> {
    self.interactions.is_favorited(user_id, product_id).await
  }

  #[instrument(name = "interaction_service::list_favorites", skip(self), err(Display))]
  pub async fn list_favorites(&self, user_id: UserId) -> ShopResult<Vec<FavoriteEntry>> {
    let favorites = self.interactions.list_favorites(user_id).await?;
    let product_ids: Vec<Uuid> = favorites.iter().map(|f| f.product_id).collect();
    let mut products: HashMap<Uuid, Product> = self
      .catalog
      .get_products(&product_ids)
      .await?
      .into_iter()
      .map(|p| (p.id, p))
      .collect();

    let entries = favorites
      .into_iter()
      .filter_map(|favorite| {
        let product = products.remove(&favorite.product_id);
        if product.is_none() {
          warn!("List favorites: product {} is gone from the catalog.", favorite.product_id);
        }
        product.map(|p| FavoriteEntry::new(favorite, p))
      })
      .collect();
    Ok(entries)
  }
}
