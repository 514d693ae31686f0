use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::catalog::Money;
use crate::domain::order::{
  Order, OrderError, OrderSnapshot, OrderStatus, ports::OrderLedger,
};

use super::stock;

#[derive(Debug, FromRow)]
struct OrderRow {
  id: Uuid,
  user_id: Uuid,
  items: Json<OrderSnapshot>,
  total: i64,
  status: String,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
  type Error = OrderError;

  fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
    let total = Money::new(row.total)?;
    let status = OrderStatus::from_str(&row.status)?;

    Ok(Order::from_storage(
      row.id,
      row.user_id,
      row.items.0,
      total,
      status,
      row.created_at,
      row.updated_at,
    ))
  }
}

pub struct PostgresOrderLedger {
  pool: PgPool,
}

impl PostgresOrderLedger {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

const ORDER_COLUMNS: &str = "id, user_id, items, total, status, created_at, updated_at";

#[async_trait]
impl OrderLedger for PostgresOrderLedger {
  async fn place(&self, order: Order) -> Result<Order, OrderError> {
    let mut tx = self.pool.begin().await?;

    // Every decrement must hold or the whole placement rolls back
    for (product_id, line) in order.items().iter() {
      if stock::decrement_stock(&mut *tx, *product_id, line.count)
        .await?
        .is_none()
      {
        let available = stock::read_stock(&mut *tx, *product_id).await?;
        return match available {
          Some(available) => Err(OrderError::InsufficientStock {
            product_id: *product_id,
            available,
          }),
          None => Err(OrderError::ProductUnavailable(*product_id)),
        };
      }
    }

    let row = sqlx::query_as::<_, OrderRow>(&format!(
      r#"
            INSERT INTO orders (id, user_id, items, total, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {ORDER_COLUMNS}
            "#,
    ))
    .bind(order.id)
    .bind(order.user_id)
    .bind(Json(order.items()))
    .bind(order.total().minor_units())
    .bind(order.status.as_str())
    .bind(order.created_at)
    .bind(order.updated_at)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    row.try_into()
  }

  async fn find_by_id(&self, order_id: Uuid) -> Result<Option<Order>, OrderError> {
    let row = sqlx::query_as::<_, OrderRow>(&format!(
      "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1",
    ))
    .bind(order_id)
    .fetch_optional(&self.pool)
    .await?;

    row.map(Order::try_from).transpose()
  }

  async fn find_by_user(
    &self,
    user_id: Uuid,
    limit: i64,
    offset: i64,
  ) -> Result<Vec<Order>, OrderError> {
    let rows = sqlx::query_as::<_, OrderRow>(&format!(
      r#"
            SELECT {ORDER_COLUMNS}
            FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
    ))
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(Order::try_from).collect()
  }

  async fn count_by_user(&self, user_id: Uuid) -> Result<i64, OrderError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders WHERE user_id = $1")
      .bind(user_id)
      .fetch_one(&self.pool)
      .await?;

    Ok(count)
  }

  async fn transition(
    &self,
    order_id: Uuid,
    from: OrderStatus,
    to: OrderStatus,
    restock: &[(Uuid, i64)],
  ) -> Result<Option<Order>, OrderError> {
    let mut tx = self.pool.begin().await?;

    // The status guard makes concurrent transitions race for one winner
    let row = sqlx::query_as::<_, OrderRow>(&format!(
      r#"
            UPDATE orders
            SET status = $3, updated_at = now()
            WHERE id = $1 AND status = $2
            RETURNING {ORDER_COLUMNS}
            "#,
    ))
    .bind(order_id)
    .bind(from.as_str())
    .bind(to.as_str())
    .fetch_optional(&mut *tx)
    .await?;

    let Some(row) = row else {
      return Ok(None);
    };

    for (product_id, count) in restock {
      stock::increment_stock(&mut *tx, *product_id, *count).await?;
    }

    tx.commit().await?;
    row.try_into().map(Some)
  }
}
