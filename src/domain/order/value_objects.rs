use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::catalog::{Money, ValueObjectError};

/// Order lifecycle status.
///
/// `Designed` is the only initial status; `Completed` and `Cancelled` are
/// terminal. Which transitions are legal is not encoded here but in
/// [`StatusPolicy`], so the policy stays a single-point edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
  Designed,
  OnAssembly,
  Sent,
  Delivered,
  Completed,
  Cancelled,
}

impl OrderStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      OrderStatus::Designed => "designed",
      OrderStatus::OnAssembly => "on_assembly",
      OrderStatus::Sent => "sent",
      OrderStatus::Delivered => "delivered",
      OrderStatus::Completed => "completed",
      OrderStatus::Cancelled => "cancelled",
    }
  }

  pub fn is_terminal(&self) -> bool {
    matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown status: {0}")]
pub struct UnknownStatusError(pub String);

impl FromStr for OrderStatus {
  type Err = UnknownStatusError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "designed" => Ok(OrderStatus::Designed),
      "on_assembly" => Ok(OrderStatus::OnAssembly),
      "sent" => Ok(OrderStatus::Sent),
      "delivered" => Ok(OrderStatus::Delivered),
      "completed" => Ok(OrderStatus::Completed),
      "cancelled" => Ok(OrderStatus::Cancelled),
      _ => Err(UnknownStatusError(s.to_string())),
    }
  }
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Transition policy as an explicit predecessor table: each entry maps a
/// target status to the single status an order must currently hold for the
/// change to be legal. Constructed once and handed to the order service.
#[derive(Debug, Clone)]
pub struct StatusPolicy {
  // (target, required predecessor)
  edges: Vec<(OrderStatus, OrderStatus)>,
}

impl StatusPolicy {
  /// The shop's standard lifecycle:
  /// Designed → OnAssembly → Sent → Delivered → Completed, with
  /// Designed → Cancelled as the only other edge.
  pub fn standard() -> Self {
    Self {
      edges: vec![
        (OrderStatus::OnAssembly, OrderStatus::Designed),
        (OrderStatus::Sent, OrderStatus::OnAssembly),
        (OrderStatus::Delivered, OrderStatus::Sent),
        (OrderStatus::Completed, OrderStatus::Delivered),
        (OrderStatus::Cancelled, OrderStatus::Designed),
      ],
    }
  }

  /// The status an order must be in before moving to `target`, or `None`
  /// when `target` is not a reachable status at all (e.g. `Designed`, which
  /// only ever appears at creation).
  pub fn required_predecessor(&self, target: OrderStatus) -> Option<OrderStatus> {
    self
      .edges
      .iter()
      .find(|(to, _)| *to == target)
      .map(|(_, from)| *from)
  }

  pub fn is_allowed(&self, current: OrderStatus, target: OrderStatus) -> bool {
    self.required_predecessor(target) == Some(current)
  }
}

/// One line of an order snapshot: the unit price at the moment of placement
/// and how many units were bought at that price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotLine {
  pub unit_price: Money,
  pub count: i64,
}

/// The frozen contents of an order: product → (price, count), captured at
/// placement. Keys are ordered so the serialized form is deterministic.
/// Also the source of truth for inventory reversal on cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderSnapshot(BTreeMap<Uuid, SnapshotLine>);

impl OrderSnapshot {
  pub fn from_lines(
    lines: impl IntoIterator<Item = (Uuid, Money, i64)>,
  ) -> Result<Self, ValueObjectError> {
    let mut map = BTreeMap::new();
    for (product_id, unit_price, count) in lines {
      if count <= 0 {
        return Err(ValueObjectError::InvalidQuantity(format!(
          "Snapshot count must be positive for product {}",
          product_id
        )));
      }
      map.insert(product_id, SnapshotLine { unit_price, count });
    }
    Ok(Self(map))
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&Uuid, &SnapshotLine)> {
    self.0.iter()
  }

  /// Σ price × count over all lines, overflow-checked.
  pub fn total(&self) -> Result<Money, ValueObjectError> {
    let mut total = Money::zero();
    for line in self.0.values() {
      total = total.checked_add(line.unit_price.checked_mul(line.count)?)?;
    }
    Ok(total)
  }

  /// The (product, count) pairs to put back on cancellation — exactly the
  /// quantities recorded at placement.
  pub fn restock_counts(&self) -> Vec<(Uuid, i64)> {
    self
      .0
      .iter()
      .map(|(product_id, line)| (*product_id, line.count))
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn money(v: i64) -> Money {
    Money::new(v).unwrap()
  }

  #[test]
  fn test_status_round_trip() {
    for status in [
      OrderStatus::Designed,
      OrderStatus::OnAssembly,
      OrderStatus::Sent,
      OrderStatus::Delivered,
      OrderStatus::Completed,
      OrderStatus::Cancelled,
    ] {
      assert_eq!(OrderStatus::from_str(status.as_str()).unwrap(), status);
    }
    assert!(OrderStatus::from_str("returned").is_err());
  }

  #[test]
  fn test_terminal_statuses() {
    assert!(OrderStatus::Completed.is_terminal());
    assert!(OrderStatus::Cancelled.is_terminal());
    assert!(!OrderStatus::Designed.is_terminal());
  }

  #[test]
  fn test_standard_policy_edges() {
    let policy = StatusPolicy::standard();
    assert!(policy.is_allowed(OrderStatus::Designed, OrderStatus::OnAssembly));
    assert!(policy.is_allowed(OrderStatus::OnAssembly, OrderStatus::Sent));
    assert!(policy.is_allowed(OrderStatus::Sent, OrderStatus::Delivered));
    assert!(policy.is_allowed(OrderStatus::Delivered, OrderStatus::Completed));
    assert!(policy.is_allowed(OrderStatus::Designed, OrderStatus::Cancelled));

    // Cancellation is legal only from Designed
    assert!(!policy.is_allowed(OrderStatus::OnAssembly, OrderStatus::Cancelled));
    assert!(!policy.is_allowed(OrderStatus::Sent, OrderStatus::Cancelled));

    // No skipping, no going back
    assert!(!policy.is_allowed(OrderStatus::Designed, OrderStatus::Sent));
    assert!(!policy.is_allowed(OrderStatus::Sent, OrderStatus::OnAssembly));

    // Designed is never a transition target
    assert_eq!(policy.required_predecessor(OrderStatus::Designed), None);
  }

  #[test]
  fn test_snapshot_total() {
    let p1 = Uuid::new_v4();
    let p2 = Uuid::new_v4();
    let snapshot =
      OrderSnapshot::from_lines([(p1, money(100), 2), (p2, money(50), 1)]).unwrap();
    assert_eq!(snapshot.total().unwrap(), money(250));
    assert_eq!(snapshot.len(), 2);
  }

  #[test]
  fn test_snapshot_rejects_non_positive_count() {
    let err = OrderSnapshot::from_lines([(Uuid::new_v4(), money(100), 0)]);
    assert!(err.is_err());
  }

  #[test]
  fn test_snapshot_total_overflow() {
    let snapshot =
      OrderSnapshot::from_lines([(Uuid::new_v4(), money(i64::MAX), 2)]).unwrap();
    assert!(snapshot.total().is_err());
  }

  #[test]
  fn test_restock_counts_match_snapshot() {
    let p1 = Uuid::new_v4();
    let snapshot = OrderSnapshot::from_lines([(p1, money(100), 3)]).unwrap();
    assert_eq!(snapshot.restock_counts(), vec![(p1, 3)]);
  }

  #[test]
  fn test_snapshot_serializes_as_map() {
    let p1 = Uuid::new_v4();
    let snapshot = OrderSnapshot::from_lines([(p1, money(100), 2)]).unwrap();
    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json[p1.to_string()]["unit_price"], 100);
    assert_eq!(json[p1.to_string()]["count"], 2);

    let back: OrderSnapshot = serde_json::from_value(json).unwrap();
    assert_eq!(back, snapshot);
  }
}
