use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::cart::{CartError, CartService};

#[derive(Debug)]
pub struct GetCartCommand {
  pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct CartLineDto {
  pub product_id: Uuid,
  pub count: i64,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct GetCartResponse {
  pub lines: Vec<CartLineDto>,
}

pub struct GetCartUseCase {
  cart_service: Arc<CartService>,
}

impl GetCartUseCase {
  pub fn new(cart_service: Arc<CartService>) -> Self {
    Self { cart_service }
  }

  pub async fn execute(&self, command: GetCartCommand) -> Result<GetCartResponse, CartError> {
    let lines = self.cart_service.list(command.user_id).await?;

    Ok(GetCartResponse {
      lines: lines
        .into_iter()
        .map(|line| CartLineDto {
          product_id: line.product_id,
          count: line.count,
          updated_at: line.updated_at,
        })
        .collect(),
    })
  }
}
