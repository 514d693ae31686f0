use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::cart::{CartError, CartService};

#[derive(Debug)]
pub struct AddToCartCommand {
  pub user_id: Uuid,
  pub product_id: Uuid,
  pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct AddToCartResponse {
  pub product_id: Uuid,
  pub count: i64,
}

pub struct AddToCartUseCase {
  cart_service: Arc<CartService>,
}

impl AddToCartUseCase {
  pub fn new(cart_service: Arc<CartService>) -> Self {
    Self { cart_service }
  }

  pub async fn execute(&self, command: AddToCartCommand) -> Result<AddToCartResponse, CartError> {
    let line = self
      .cart_service
      .add(command.user_id, command.product_id, command.count)
      .await?;

    Ok(AddToCartResponse {
      product_id: line.product_id,
      count: line.count,
    })
  }
}
