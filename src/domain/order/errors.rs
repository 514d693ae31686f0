use thiserror::Error;
use uuid::Uuid;

use crate::domain::cart::CartError;
use crate::domain::catalog::{CatalogError, ValueObjectError};

use super::value_objects::{OrderStatus, UnknownStatusError};

#[derive(Debug, Error)]
pub enum OrderError {
  #[error("Cannot place an order from an empty cart")]
  EmptyCart,

  #[error("Insufficient stock for product {product_id}: {available} available")]
  InsufficientStock { product_id: Uuid, available: i64 },

  #[error("Product is not available for ordering: {0}")]
  ProductUnavailable(Uuid),

  #[error("Order not found: {0}")]
  OrderNotFound(Uuid),

  #[error("Unknown status: {0}")]
  UnknownStatus(String),

  #[error("Order in status {current} cannot move to {requested}")]
  InvalidTransition {
    current: OrderStatus,
    requested: OrderStatus,
  },

  #[error("Permission denied: {0}")]
  PermissionDenied(String),

  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Cart error: {0}")]
  Cart(#[from] CartError),

  #[error("Catalog error: {0}")]
  Catalog(CatalogError),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Internal error: {0}")]
  Internal(String),
}

impl From<UnknownStatusError> for OrderError {
  fn from(err: UnknownStatusError) -> Self {
    OrderError::UnknownStatus(err.0)
  }
}

// Stock and existence failures from the catalog keep their specific shape
// so the HTTP layer can map them to precise responses.
impl From<CatalogError> for OrderError {
  fn from(err: CatalogError) -> Self {
    match err {
      CatalogError::InsufficientStock {
        product_id,
        available,
      } => OrderError::InsufficientStock {
        product_id,
        available,
      },
      CatalogError::ProductNotFound(id) => OrderError::ProductUnavailable(id),
      other => OrderError::Catalog(other),
    }
  }
}
