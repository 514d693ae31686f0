use sqlx::PgExecutor;
use uuid::Uuid;

/// Conditional stock decrement. The guard and the write are one statement,
/// so concurrent callers serialize on the row and stock cannot go negative.
/// Returns the remaining stock, or `None` when the guard did not hold.
pub(crate) async fn decrement_stock<'e, E>(
  executor: E,
  product_id: Uuid,
  count: i64,
) -> Result<Option<i64>, sqlx::Error>
where
  E: PgExecutor<'e>,
{
  let row: Option<(i64,)> = sqlx::query_as(
    r#"
        UPDATE products
        SET stock = stock - $2
        WHERE id = $1 AND stock >= $2
        RETURNING stock
        "#,
  )
  .bind(product_id)
  .bind(count)
  .fetch_optional(executor)
  .await?;

  Ok(row.map(|(stock,)| stock))
}

/// Unconditional stock increment for restocks. Returns the new stock, or
/// `None` when the product does not exist.
pub(crate) async fn increment_stock<'e, E>(
  executor: E,
  product_id: Uuid,
  count: i64,
) -> Result<Option<i64>, sqlx::Error>
where
  E: PgExecutor<'e>,
{
  let row: Option<(i64,)> = sqlx::query_as(
    r#"
        UPDATE products
        SET stock = stock + $2
        WHERE id = $1
        RETURNING stock
        "#,
  )
  .bind(product_id)
  .bind(count)
  .fetch_optional(executor)
  .await?;

  Ok(row.map(|(stock,)| stock))
}

pub(crate) async fn read_stock<'e, E>(
  executor: E,
  product_id: Uuid,
) -> Result<Option<i64>, sqlx::Error>
where
  E: PgExecutor<'e>,
{
  let row: Option<(i64,)> = sqlx::query_as("SELECT stock FROM products WHERE id = $1")
    .bind(product_id)
    .fetch_optional(executor)
    .await?;

  Ok(row.map(|(stock,)| stock))
}
