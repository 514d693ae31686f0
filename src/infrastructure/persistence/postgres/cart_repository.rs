use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::cart::{CartError, CartLine, CartMutation, ports::CartStore};

#[derive(Debug, FromRow)]
struct CartLineRow {
  user_id: Uuid,
  product_id: Uuid,
  count: i64,
  updated_at: DateTime<Utc>,
}

impl From<CartLineRow> for CartLine {
  fn from(row: CartLineRow) -> Self {
    CartLine {
      user_id: row.user_id,
      product_id: row.product_id,
      count: row.count,
      updated_at: row.updated_at,
    }
  }
}

pub struct PostgresCartStore {
  pool: PgPool,
}

impl PostgresCartStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl CartStore for PostgresCartStore {
  async fn list(&self, user_id: Uuid) -> Result<Vec<CartLine>, CartError> {
    let rows = sqlx::query_as::<_, CartLineRow>(
      r#"
            SELECT user_id, product_id, count, updated_at
            FROM cart_items
            WHERE user_id = $1
            ORDER BY updated_at
            "#,
    )
    .bind(user_id)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(CartLine::from).collect())
  }

  async fn add(
    &self,
    user_id: Uuid,
    product_id: Uuid,
    count: i64,
  ) -> Result<CartLine, CartError> {
    let row = sqlx::query_as::<_, CartLineRow>(
      r#"
            INSERT INTO cart_items (user_id, product_id, count, updated_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (user_id, product_id)
            DO UPDATE SET count = cart_items.count + EXCLUDED.count, updated_at = now()
            RETURNING user_id, product_id, count, updated_at
            "#,
    )
    .bind(user_id)
    .bind(product_id)
    .bind(count)
    .fetch_one(&self.pool)
    .await?;

    Ok(row.into())
  }

  async fn reduce(
    &self,
    user_id: Uuid,
    product_id: Uuid,
    count: i64,
  ) -> Result<CartMutation, CartError> {
    let mut tx = self.pool.begin().await?;

    // Subtract while the result stays positive, otherwise drop the line
    let updated: Option<(i64,)> = sqlx::query_as(
      r#"
            UPDATE cart_items
            SET count = count - $3, updated_at = now()
            WHERE user_id = $1 AND product_id = $2 AND count > $3
            RETURNING count
            "#,
    )
    .bind(user_id)
    .bind(product_id)
    .bind(count)
    .fetch_optional(&mut *tx)
    .await?;

    let mutation = match updated {
      Some((new_count,)) => CartMutation {
        product_id,
        new_count,
        removed: false,
      },
      None => {
        let deleted: Option<(i64,)> = sqlx::query_as(
          r#"
                    DELETE FROM cart_items
                    WHERE user_id = $1 AND product_id = $2
                    RETURNING count
                    "#,
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_optional(&mut *tx)
        .await?;

        if deleted.is_none() {
          return Err(CartError::LineNotFound(product_id));
        }
        CartMutation {
          product_id,
          new_count: 0,
          removed: true,
        }
      }
    };

    tx.commit().await?;
    Ok(mutation)
  }

  async fn clear(&self, user_id: Uuid) -> Result<(), CartError> {
    sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
      .bind(user_id)
      .execute(&self.pool)
      .await?;

    Ok(())
  }

  async fn reconcile_placed(&self) -> Result<u64, CartError> {
    // A cart line strictly older than its owner's newest order was part of
    // a placement whose clear step got lost
    let result = sqlx::query(
      r#"
            DELETE FROM cart_items c
            USING orders o
            WHERE o.user_id = c.user_id AND o.created_at > c.updated_at
            "#,
    )
    .execute(&self.pool)
    .await?;

    Ok(result.rows_affected())
  }
}
