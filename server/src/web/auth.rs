// server/src/web/auth.rs

use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use shopfront::UserId;
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

/// Header carrying the caller's identity, set by the upstream gateway.
pub const USER_ID_HEADER: &str = "X-User-ID";

/// The caller as resolved by the configured `IdentityProvider`.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
  pub user_id: UserId,
}

/// For endpoints that also serve anonymous callers. `None` only when the identity header is
/// absent; a header that is present but does not resolve is still rejected with 401.
#[derive(Debug, Clone, Copy)]
pub struct MaybeAuthenticatedUser(pub Option<AuthenticatedUser>);

impl MaybeAuthenticatedUser {
  pub fn user_id(&self) -> Option<UserId> {
    self.0.map(|user| user.user_id)
  }
}

fn resolve_user(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
  let Some(app_state) = req.app_data::<web::Data<AppState>>() else {
    return Err(AppError::Internal("Application state is not configured.".to_string()));
  };

  let credential = req.headers().get(USER_ID_HEADER).and_then(|v| v.to_str().ok());
  app_state
    .identity
    .current_user(credential)
    .map(|user_id| AuthenticatedUser { user_id })
    .map_err(|e| {
      warn!(error = %e, "AuthenticatedUser extractor: identity not resolved.");
      AppError::from(e)
    })
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    ready(resolve_user(req))
  }
}

impl FromRequest for MaybeAuthenticatedUser {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    if !req.headers().contains_key(USER_ID_HEADER) {
      return ready(Ok(MaybeAuthenticatedUser(None)));
    }
    ready(resolve_user(req).map(|user| MaybeAuthenticatedUser(Some(user))))
  }
}
