// core/src/identity.rs

//! Resolution of the authenticated user for a request.
//!
//! The storefront never authenticates anyone itself. Whatever sits in front of it
//! (session layer, gateway, token service) hands over an opaque credential and an
//! `IdentityProvider` turns that into a `UserId`, or refuses with `Unauthorized`.

use crate::error::{ShopError, ShopResult};
use tracing::debug;
use uuid::Uuid;

pub type UserId = Uuid;

pub trait IdentityProvider: Send + Sync {
  /// Resolves the credential attached to a request. `None` means the request carried none.
  fn current_user(&self, credential: Option<&str>) -> ShopResult<UserId>;
}

/// Treats the credential as the user's UUID, as forwarded by an upstream gateway
/// in a trusted header.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeaderIdentityProvider;

impl IdentityProvider for HeaderIdentityProvider {
  fn current_user(&self, credential: Option<&str>) -> ShopResult<UserId> {
    let raw = credential
      .map(str::trim)
      .filter(|s| !s.is_empty())
      .ok_or_else(|| ShopError::Unauthorized("User authentication required.".to_string()))?;

    Uuid::parse_str(raw).map_err(|e| {
      debug!(error = %e, "Rejected malformed user credential.");
      ShopError::Unauthorized("Malformed user credential.".to_string())
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn resolves_uuid_credential() {
    let id = Uuid::new_v4();
    let resolved = HeaderIdentityProvider.current_user(Some(&id.to_string())).unwrap();
    assert_eq!(resolved, id);
  }

  #[test]
  fn trims_surrounding_whitespace() {
    let id = Uuid::new_v4();
    let padded = format!("  {}  ", id);
    assert_eq!(HeaderIdentityProvider.current_user(Some(&padded)).unwrap(), id);
  }

  #[test]
  fn missing_or_blank_credential_is_unauthorized() {
    assert!(matches!(
      HeaderIdentityProvider.current_user(None),
      Err(ShopError::Unauthorized(_))
    ));
    assert!(matches!(
      HeaderIdentityProvider.current_user(Some("   ")),
      Err(ShopError::Unauthorized(_))
    ));
  }

  #[test]
  fn malformed_credential_is_unauthorized() {
    assert!(matches!(
      HeaderIdentityProvider.current_user(Some("not-a-user")),
      Err(ShopError::Unauthorized(_))
    ));
  }
}
