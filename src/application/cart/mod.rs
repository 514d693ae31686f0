pub mod add_to_cart;
pub mod clear_cart;
pub mod get_cart;
pub mod reduce_cart_item;

pub use add_to_cart::{AddToCartCommand, AddToCartResponse, AddToCartUseCase};
pub use clear_cart::{ClearCartCommand, ClearCartUseCase};
pub use get_cart::{CartLineDto, GetCartCommand, GetCartResponse, GetCartUseCase};
pub use reduce_cart_item::{
  ReduceCartItemCommand, ReduceCartItemResponse, ReduceCartItemUseCase,
};
