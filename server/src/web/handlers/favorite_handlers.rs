// server/src/web/handlers/favorite_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::auth::AuthenticatedUser;

#[instrument(name = "handler::list_favorites", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn list_favorites_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let favorites = app_state.interaction_service.list_favorites(auth_user.user_id).await?;
  Ok(HttpResponse::Ok().json(json!({
      "message": "Favorites fetched successfully.",
      "favorites": favorites
  })))
}
