use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid amount: {0}")]
  InvalidAmount(String),
  #[error("Invalid quantity: {0}")]
  InvalidQuantity(String),
  #[error("Invalid product name: {0}")]
  InvalidProductName(String),
}

/// Amount in minor currency units (e.g. cents). Always non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
  pub fn new(minor_units: i64) -> Result<Self, ValueObjectError> {
    if minor_units < 0 {
      return Err(ValueObjectError::InvalidAmount(
        "Amount cannot be negative".to_string(),
      ));
    }
    Ok(Self(minor_units))
  }

  pub fn zero() -> Self {
    Self(0)
  }

  pub fn minor_units(&self) -> i64 {
    self.0
  }

  pub fn checked_add(&self, other: Money) -> Result<Money, ValueObjectError> {
    self
      .0
      .checked_add(other.0)
      .map(Money)
      .ok_or_else(|| ValueObjectError::InvalidAmount("Amount overflow".to_string()))
  }

  pub fn checked_mul(&self, count: i64) -> Result<Money, ValueObjectError> {
    if count < 0 {
      return Err(ValueObjectError::InvalidAmount(
        "Cannot multiply by a negative count".to_string(),
      ));
    }
    self
      .0
      .checked_mul(count)
      .map(Money)
      .ok_or_else(|| ValueObjectError::InvalidAmount("Amount overflow".to_string()))
  }
}

impl fmt::Display for Money {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
  }
}

/// Whole number of product units, always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(i64);

impl Quantity {
  pub fn new(value: i64) -> Result<Self, ValueObjectError> {
    if value <= 0 {
      return Err(ValueObjectError::InvalidQuantity(
        "Quantity must be positive".to_string(),
      ));
    }
    Ok(Self(value))
  }

  pub fn value(&self) -> i64 {
    self.0
  }
}

// Product name as shown in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductName(String);

impl ProductName {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidProductName(
        "Product name cannot be empty".to_string(),
      ));
    }
    if trimmed.len() > 255 {
      return Err(ValueObjectError::InvalidProductName(
        "Product name cannot exceed 255 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_money() {
    let price = Money::new(1050).unwrap();
    assert_eq!(price.minor_units(), 1050);
    assert_eq!(price.to_string(), "10.50");
    assert!(Money::new(-1).is_err());
  }

  #[test]
  fn test_money_arithmetic() {
    let a = Money::new(100).unwrap();
    let b = Money::new(50).unwrap();
    assert_eq!(a.checked_add(b).unwrap().minor_units(), 150);
    assert_eq!(a.checked_mul(3).unwrap().minor_units(), 300);
    assert!(a.checked_mul(-1).is_err());
    assert!(Money::new(i64::MAX).unwrap().checked_mul(2).is_err());
  }

  #[test]
  fn test_quantity() {
    assert_eq!(Quantity::new(3).unwrap().value(), 3);
    assert!(Quantity::new(0).is_err());
    assert!(Quantity::new(-2).is_err());
  }

  #[test]
  fn test_product_name() {
    assert!(ProductName::new("Pear Phone 16".to_string()).is_ok());
    assert!(ProductName::new("   ".to_string()).is_err());
  }
}
