use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::catalog::{Money, ValueObjectError};

use super::value_objects::{OrderSnapshot, OrderStatus};

/// A placed order. The item snapshot and the total are captured at
/// placement and never change afterwards; only `status` and `updated_at`
/// move. Both fields are private so the rest of the crate cannot rewrite
/// them by accident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
  pub id: Uuid,
  pub user_id: Uuid,
  items: OrderSnapshot,
  total: Money,
  pub status: OrderStatus,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Order {
  /// Builds a new order in `Designed` status from a snapshot of cart
  /// contents. The total is derived from the snapshot here, once.
  pub fn place(user_id: Uuid, items: OrderSnapshot) -> Result<Self, ValueObjectError> {
    let total = items.total()?;
    let now = Utc::now();
    Ok(Self {
      id: Uuid::new_v4(),
      user_id,
      items,
      total,
      status: OrderStatus::Designed,
      created_at: now,
      updated_at: now,
    })
  }

  /// Rehydrates an order from storage without recomputing anything.
  pub fn from_storage(
    id: Uuid,
    user_id: Uuid,
    items: OrderSnapshot,
    total: Money,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      user_id,
      items,
      total,
      status,
      created_at,
      updated_at,
    }
  }

  pub fn items(&self) -> &OrderSnapshot {
    &self.items
  }

  pub fn total(&self) -> Money {
    self.total
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn money(v: i64) -> Money {
    Money::new(v).unwrap()
  }

  #[test]
  fn test_place_computes_total_and_starts_designed() {
    let snapshot = OrderSnapshot::from_lines([
      (Uuid::new_v4(), money(100), 2),
      (Uuid::new_v4(), money(50), 1),
    ])
    .unwrap();
    let order = Order::place(Uuid::new_v4(), snapshot).unwrap();
    assert_eq!(order.total(), money(250));
    assert_eq!(order.status, OrderStatus::Designed);
    assert_eq!(order.created_at, order.updated_at);
  }

  #[test]
  fn test_total_survives_status_change() {
    let snapshot = OrderSnapshot::from_lines([(Uuid::new_v4(), money(999), 3)]).unwrap();
    let mut order = Order::place(Uuid::new_v4(), snapshot.clone()).unwrap();
    let total_before = order.total();

    order.status = OrderStatus::OnAssembly;
    assert_eq!(order.total(), total_before);
    assert_eq!(order.items(), &snapshot);
  }
}
