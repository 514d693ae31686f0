use thiserror::Error;
use uuid::Uuid;

use crate::domain::catalog::ValueObjectError;

#[derive(Debug, Error)]
pub enum CartError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Product not found: {0}")]
  ProductNotFound(Uuid),

  #[error("Product is not available for ordering: {0}")]
  ProductUnavailable(Uuid),

  #[error("Cart line not found for product {0}")]
  LineNotFound(Uuid),

  #[error("Insufficient stock for product {product_id}: {available} available")]
  InsufficientStock { product_id: Uuid, available: i64 },

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Internal error: {0}")]
  Internal(String),
}
