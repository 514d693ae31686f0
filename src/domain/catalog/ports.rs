use async_trait::async_trait;
use uuid::Uuid;

use super::entities::Product;
use super::errors::CatalogError;

/// Catalog reads plus the inventory ledger.
///
/// `decrement_stock` and `increment_stock` are the only stock mutation paths
/// in the system. Implementations must apply them as single conditional
/// updates (`stock = stock - n WHERE stock >= n`), never as read-then-write,
/// so that concurrent orders on the same product serialize at the storage
/// layer and stock can never go negative.
#[async_trait]
pub trait ProductRepository: Send + Sync {
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, CatalogError>;
  async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, CatalogError>;

  /// Subtract `count` from stock. Fails with `InsufficientStock` (reporting
  /// current availability) when the guard does not hold. Returns new stock.
  async fn decrement_stock(&self, id: Uuid, count: i64) -> Result<i64, CatalogError>;

  /// Add `count` back to stock. Always succeeds for an existing product.
  /// Returns new stock.
  async fn increment_stock(&self, id: Uuid, count: i64) -> Result<i64, CatalogError>;
}
