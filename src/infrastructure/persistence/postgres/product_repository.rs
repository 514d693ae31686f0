use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::catalog::{
  CatalogError, Money, Product, ProductName, ports::ProductRepository,
};

use super::stock;

#[derive(Debug, FromRow)]
struct ProductRow {
  id: Uuid,
  name: String,
  price: i64,
  stock: i64,
  is_active: bool,
  created_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
  type Error = CatalogError;

  fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
    let name = ProductName::new(row.name)?;
    let price = Money::new(row.price)?;

    Ok(Product {
      id: row.id,
      name,
      price,
      stock: row.stock,
      is_active: row.is_active,
      created_at: row.created_at,
    })
  }
}

pub struct PostgresProductRepository {
  pool: PgPool,
}

impl PostgresProductRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, CatalogError> {
    let row = sqlx::query_as::<_, ProductRow>(
      r#"
            SELECT id, name, price, stock, is_active, created_at
            FROM products
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(Product::try_from).transpose()
  }

  async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, CatalogError> {
    let rows = sqlx::query_as::<_, ProductRow>(
      r#"
            SELECT id, name, price, stock, is_active, created_at
            FROM products
            WHERE id = ANY($1)
            "#,
    )
    .bind(ids)
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(Product::try_from).collect()
  }

  async fn decrement_stock(&self, id: Uuid, count: i64) -> Result<i64, CatalogError> {
    match stock::decrement_stock(&self.pool, id, count).await? {
      Some(remaining) => Ok(remaining),
      None => match stock::read_stock(&self.pool, id).await? {
        Some(available) => Err(CatalogError::InsufficientStock {
          product_id: id,
          available,
        }),
        None => Err(CatalogError::ProductNotFound(id)),
      },
    }
  }

  async fn increment_stock(&self, id: Uuid, count: i64) -> Result<i64, CatalogError> {
    stock::increment_stock(&self.pool, id, count)
      .await?
      .ok_or(CatalogError::ProductNotFound(id))
  }
}
