use async_trait::async_trait;
use uuid::Uuid;

use super::entities::Order;
use super::errors::OrderError;
use super::value_objects::OrderStatus;

/// Storage port for orders. Placement and status transitions must each be
/// atomic with their inventory side effects: `place` commits the order row
/// and all stock decrements in one unit or not at all, and `transition`
/// commits the status change together with any restock increments.
#[async_trait]
pub trait OrderLedger: Send + Sync {
  /// Persists a freshly placed order, decrementing stock for every snapshot
  /// line. Fails with `InsufficientStock` (and leaves all stock untouched)
  /// when any single line cannot be covered.
  async fn place(&self, order: Order) -> Result<Order, OrderError>;

  async fn find_by_id(&self, order_id: Uuid) -> Result<Option<Order>, OrderError>;

  async fn find_by_user(
    &self,
    user_id: Uuid,
    limit: i64,
    offset: i64,
  ) -> Result<Vec<Order>, OrderError>;

  async fn count_by_user(&self, user_id: Uuid) -> Result<i64, OrderError>;

  /// Conditionally moves an order from `from` to `to`, applying `restock`
  /// increments in the same unit. Returns `Ok(None)` when the order is no
  /// longer in `from`, i.e. a concurrent transition won.
  async fn transition(
    &self,
    order_id: Uuid,
    from: OrderStatus,
    to: OrderStatus,
    restock: &[(Uuid, i64)],
  ) -> Result<Option<Order>, OrderError>;
}
