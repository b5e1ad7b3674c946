// core/src/services/catalog_service.rs

use crate::error::{ShopError, ShopResult};
use crate::identity::UserId;
use crate::models::{Product, ProductDetail, ProductFilter};
use crate::store::{InteractionStore, ProductCatalog};
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

pub struct CatalogService {
  catalog: Arc<dyn ProductCatalog>,
  interactions: Arc<dyn InteractionStore>,
}

impl CatalogService {
  pub fn new(catalog: Arc<dyn ProductCatalog>, interactions: Arc<dyn InteractionStore>) -> Self {
    Self { catalog, interactions }
  }

  #[instrument(name = "catalog_service::list_products", skip(self), err(Display))]
  pub async fn list_products(&self, filter: &ProductFilter) -> ShopResult<Vec<Product>> {
    let products = self.catalog.list_products(filter).await?;
    debug!("Fetched {} products.", products.len());
    Ok(products)
  }

  /// Product with its rating aggregate. The per-user flags stay false for anonymous viewers.
  #[instrument(name = "catalog_service::product_detail", skip(self), err(Display))]
  pub async fn product_detail(&self, viewer: Option<UserId>, product_id: Uuid) -> ShopResult<ProductDetail> {
    let product = self
      .catalog
      .get_product(product_id)
      .await?
      .ok_or_else(|| ShopError::product_not_found(product_id))?;

    let summary = self.interactions.rating_summary(product_id).await?;

    let (is_liked, is_favorited, is_rated) = match viewer {
      Some(user_id) => (
        self.interactions.is_liked(user_id, product_id).await?,
        self.interactions.is_favorited(user_id, product_id).await?,
        self.interactions.user_rating(user_id, product_id).await?.is_some(),
      ),
      None => (false, false, false),
    };

    Ok(ProductDetail {
      product,
      avg_rate: summary.avg_rate,
      tot_rate: summary.tot_rate,
      is_liked,
      is_favorited,
      is_rated,
    })
  }
}
