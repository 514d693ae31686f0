use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::identity::AuthenticatedUser;
use crate::domain::order::{OrderError, OrderService};

#[derive(Debug)]
pub struct ListOrdersCommand {
  pub actor: AuthenticatedUser,
  pub owner_id: Uuid,
  pub page: i64,
  pub per_page: i64,
}

#[derive(Debug, Serialize)]
pub struct OrderListItemDto {
  pub id: Uuid,
  pub total: i64,
  pub status: String,
  pub item_count: usize,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ListOrdersResponse {
  pub orders: Vec<OrderListItemDto>,
  pub page: i64,
  pub per_page: i64,
  pub total_count: i64,
  pub total_pages: i64,
  pub has_next: bool,
  pub has_prev: bool,
}

pub struct ListOrdersUseCase {
  order_service: Arc<OrderService>,
}

impl ListOrdersUseCase {
  pub fn new(order_service: Arc<OrderService>) -> Self {
    Self { order_service }
  }

  pub async fn execute(
    &self,
    command: ListOrdersCommand,
  ) -> Result<ListOrdersResponse, OrderError> {
    let page = self
      .order_service
      .list_orders(
        &command.actor,
        command.owner_id,
        command.page,
        command.per_page,
      )
      .await?;

    let orders = page
      .orders
      .into_iter()
      .map(|o| OrderListItemDto {
        id: o.id,
        total: o.total().minor_units(),
        status: o.status.as_str().to_string(),
        item_count: o.items().len(),
        created_at: o.created_at,
        updated_at: o.updated_at,
      })
      .collect();

    Ok(ListOrdersResponse {
      orders,
      page: page.page,
      per_page: page.per_page,
      total_count: page.total_count,
      total_pages: page.total_pages,
      has_next: page.has_next,
      has_prev: page.has_prev,
    })
  }
}
