use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{CartLine, CartMutation};
use super::errors::CartError;

/// Per-user cart storage. Owned by the storefront service; order placement
/// only ever calls `list` and `clear`, never mutates counts directly.
#[async_trait]
pub trait CartStore: Send + Sync {
  async fn list(&self, user_id: Uuid) -> Result<Vec<CartLine>, CartError>;

  /// Upsert: an existing line for the same product has `count` added to it.
  async fn add(&self, user_id: Uuid, product_id: Uuid, count: i64)
  -> Result<CartLine, CartError>;

  /// Subtract `count`; the line is deleted outright when the result would be
  /// zero or below.
  async fn reduce(
    &self,
    user_id: Uuid,
    product_id: Uuid,
    count: i64,
  ) -> Result<CartMutation, CartError>;

  /// Remove every line for the user. Idempotent: clearing an empty cart is
  /// a no-op, so the call is safe to retry.
  async fn clear(&self, user_id: Uuid) -> Result<(), CartError>;

  /// Compensation for the clear-after-placement step, which runs outside the
  /// placement transaction and can be lost: delete every cart line strictly
  /// older than its owner's newest order. Returns the number of lines
  /// removed.
  async fn reconcile_placed(&self) -> Result<u64, CartError>;
}
