use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::identity::{
  AuthenticatedUser, IdentityError, Role, ports::IdentityResolver,
};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
  sub: Uuid,
  role: String,
  is_admin: bool,
  exp: i64,
}

/// Identity tokens as `base64url(claims_json) "." hex(sha256(claims || secret))`.
/// The shop issues these at login and every API request carries one; the
/// resolver only ever verifies, it holds no session state.
pub struct SignedTokenIdentity {
  secret: String,
}

impl SignedTokenIdentity {
  pub fn new(secret: String) -> Self {
    Self { secret }
  }

  fn sign(&self, payload: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload);
    hasher.update(self.secret.as_bytes());
    hex::encode(hasher.finalize())
  }

  /// Issues a token for the given claims, valid for `ttl_seconds`.
  pub fn issue(&self, user_id: Uuid, role: Role, is_admin: bool, ttl_seconds: u64) -> String {
    let claims = Claims {
      sub: user_id,
      role: role.as_str().to_string(),
      is_admin,
      exp: Utc::now().timestamp() + ttl_seconds as i64,
    };
    // Claims serialization cannot fail for this struct
    let payload = serde_json::to_vec(&claims).unwrap_or_default();
    let signature = self.sign(&payload);
    format!("{}.{}", URL_SAFE_NO_PAD.encode(&payload), signature)
  }
}

#[async_trait]
impl IdentityResolver for SignedTokenIdentity {
  async fn resolve(&self, token: &str) -> Result<AuthenticatedUser, IdentityError> {
    let (encoded_payload, signature) = token
      .split_once('.')
      .ok_or(IdentityError::MalformedToken)?;

    let payload = URL_SAFE_NO_PAD
      .decode(encoded_payload)
      .map_err(|_| IdentityError::MalformedToken)?;

    if self.sign(&payload) != signature {
      return Err(IdentityError::InvalidSignature);
    }

    let claims: Claims =
      serde_json::from_slice(&payload).map_err(|_| IdentityError::MalformedToken)?;

    if claims.exp < Utc::now().timestamp() {
      return Err(IdentityError::TokenExpired);
    }

    let role = Role::from_str(&claims.role)?;
    Ok(AuthenticatedUser::new(claims.sub, role, claims.is_admin))
  }
}
