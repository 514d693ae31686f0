use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::cart::{CartError, CartService};

#[derive(Debug)]
pub struct ReduceCartItemCommand {
  pub user_id: Uuid,
  pub product_id: Uuid,
  pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct ReduceCartItemResponse {
  pub product_id: Uuid,
  pub count: i64,
  pub removed: bool,
}

pub struct ReduceCartItemUseCase {
  cart_service: Arc<CartService>,
}

impl ReduceCartItemUseCase {
  pub fn new(cart_service: Arc<CartService>) -> Self {
    Self { cart_service }
  }

  pub async fn execute(
    &self,
    command: ReduceCartItemCommand,
  ) -> Result<ReduceCartItemResponse, CartError> {
    let mutation = self
      .cart_service
      .reduce(command.user_id, command.product_id, command.count)
      .await?;

    Ok(ReduceCartItemResponse {
      product_id: mutation.product_id,
      count: mutation.new_count,
      removed: mutation.removed,
    })
  }
}
