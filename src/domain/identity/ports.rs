use async_trait::async_trait;

use super::entities::AuthenticatedUser;
use super::errors::IdentityError;

/// Turns an opaque credential into an identity. The token's wire format is
/// the implementation's concern; callers only see the resolved claims.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
  async fn resolve(&self, token: &str) -> Result<AuthenticatedUser, IdentityError>;
}
