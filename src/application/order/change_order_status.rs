use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::identity::AuthenticatedUser;
use crate::domain::order::{OrderError, OrderService};

#[derive(Debug)]
pub struct ChangeOrderStatusCommand {
  pub actor: AuthenticatedUser,
  pub order_id: Uuid,
  pub new_status: String,
}

#[derive(Debug, Serialize)]
pub struct ChangeOrderStatusResponse {
  pub order_id: Uuid,
  pub status: String,
}

pub struct ChangeOrderStatusUseCase {
  order_service: Arc<OrderService>,
}

impl ChangeOrderStatusUseCase {
  pub fn new(order_service: Arc<OrderService>) -> Self {
    Self { order_service }
  }

  pub async fn execute(
    &self,
    command: ChangeOrderStatusCommand,
  ) -> Result<ChangeOrderStatusResponse, OrderError> {
    let order = self
      .order_service
      .change_status(&command.actor, command.order_id, &command.new_status)
      .await?;

    Ok(ChangeOrderStatusResponse {
      order_id: order.id,
      status: order.status.as_str().to_string(),
    })
  }
}
