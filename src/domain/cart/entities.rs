use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One cart line: how many units of a product a user intends to order.
/// Unique per (user, product); adds sum into the same line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
  pub user_id: Uuid,
  pub product_id: Uuid,
  pub count: i64,
  pub updated_at: DateTime<Utc>,
}

/// Outcome of a reduce operation, mirroring what the client needs to update
/// its view: the remaining count, or the fact that the line is gone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartMutation {
  pub product_id: Uuid,
  pub new_count: i64,
  pub removed: bool,
}
