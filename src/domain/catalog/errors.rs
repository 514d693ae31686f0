use thiserror::Error;
use uuid::Uuid;

use super::value_objects::ValueObjectError;

#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Product not found: {0}")]
  ProductNotFound(Uuid),

  #[error("Insufficient stock for product {product_id}: {available} available")]
  InsufficientStock { product_id: Uuid, available: i64 },

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),
}
