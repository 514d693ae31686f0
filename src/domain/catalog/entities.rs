use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::{Money, ProductName};

/// Catalog product. Stock is never mutated on this struct directly; all
/// changes go through the repository's conditional increment/decrement so a
/// read-then-write race cannot lose an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id: Uuid,
  pub name: ProductName,
  pub price: Money,
  pub stock: i64,
  pub is_active: bool,
  pub created_at: DateTime<Utc>,
}

impl Product {
  pub fn new(name: ProductName, price: Money, stock: i64) -> Self {
    Self {
      id: Uuid::new_v4(),
      name,
      price,
      stock,
      is_active: true,
      created_at: Utc::now(),
    }
  }

  /// A product can be ordered while it is active, regardless of stock; stock
  /// sufficiency is checked per requested quantity at placement time.
  pub fn is_orderable(&self) -> bool {
    self.is_active
  }

  pub fn has_stock_for(&self, count: i64) -> bool {
    self.stock >= count
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn test_product(stock: i64) -> Product {
    Product::new(
      ProductName::new("Pear Buds".to_string()).unwrap(),
      Money::new(4990).unwrap(),
      stock,
    )
  }

  #[test]
  fn test_new_product_is_active() {
    let product = test_product(5);
    assert!(product.is_orderable());
    assert_eq!(product.stock, 5);
  }

  #[test]
  fn test_has_stock_for() {
    let product = test_product(2);
    assert!(product.has_stock_for(2));
    assert!(!product.has_stock_for(3));
  }
}
