use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::identity::AuthenticatedUser;
use crate::domain::order::{Order, OrderError, OrderService};

#[derive(Debug)]
pub struct GetOrderDetailsCommand {
  pub actor: AuthenticatedUser,
  pub order_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct OrderLineDto {
  pub product_id: Uuid,
  pub unit_price: i64,
  pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct OrderDetailsResponse {
  pub id: Uuid,
  pub user_id: Uuid,
  pub items: Vec<OrderLineDto>,
  pub total: i64,
  pub status: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderDetailsResponse {
  fn from(order: Order) -> Self {
    let items = order
      .items()
      .iter()
      .map(|(product_id, line)| OrderLineDto {
        product_id: *product_id,
        unit_price: line.unit_price.minor_units(),
        count: line.count,
      })
      .collect();
    Self {
      id: order.id,
      user_id: order.user_id,
      items,
      total: order.total().minor_units(),
      status: order.status.as_str().to_string(),
      created_at: order.created_at,
      updated_at: order.updated_at,
    }
  }
}

pub struct GetOrderDetailsUseCase {
  order_service: Arc<OrderService>,
}

impl GetOrderDetailsUseCase {
  pub fn new(order_service: Arc<OrderService>) -> Self {
    Self { order_service }
  }

  pub async fn execute(
    &self,
    command: GetOrderDetailsCommand,
  ) -> Result<OrderDetailsResponse, OrderError> {
    let order = self
      .order_service
      .get_order(&command.actor, command.order_id)
      .await?;
    Ok(order.into())
  }
}
