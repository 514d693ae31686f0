use std::sync::Arc;
use uuid::Uuid;

use crate::domain::cart::{CartError, CartService};

#[derive(Debug)]
pub struct ClearCartCommand {
  pub user_id: Uuid,
}

pub struct ClearCartUseCase {
  cart_service: Arc<CartService>,
}

impl ClearCartUseCase {
  pub fn new(cart_service: Arc<CartService>) -> Self {
    Self { cart_service }
  }

  pub async fn execute(&self, command: ClearCartCommand) -> Result<(), CartError> {
    self.cart_service.clear(command.user_id).await
  }
}
