use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::order::{OrderError, OrderService, OrderStatus};

#[derive(Debug)]
pub struct PlaceOrderCommand {
  pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct PlaceOrderResponse {
  pub order_id: Uuid,
  pub total: i64,
  pub status: String,
}

pub struct PlaceOrderUseCase {
  order_service: Arc<OrderService>,
}

impl PlaceOrderUseCase {
  pub fn new(order_service: Arc<OrderService>) -> Self {
    Self { order_service }
  }

  pub async fn execute(
    &self,
    command: PlaceOrderCommand,
  ) -> Result<PlaceOrderResponse, OrderError> {
    let placed = self.order_service.place_order(command.user_id).await?;

    Ok(PlaceOrderResponse {
      order_id: placed.order_id,
      total: placed.total.minor_units(),
      status: OrderStatus::Designed.as_str().to_string(),
    })
  }
}
