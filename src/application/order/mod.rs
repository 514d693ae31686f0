pub mod change_order_status;
pub mod get_order_details;
pub mod list_orders;
pub mod place_order;

pub use change_order_status::{
  ChangeOrderStatusCommand, ChangeOrderStatusResponse, ChangeOrderStatusUseCase,
};
pub use get_order_details::{
  GetOrderDetailsCommand, OrderDetailsResponse, OrderLineDto, GetOrderDetailsUseCase,
};
pub use list_orders::{ListOrdersCommand, ListOrdersResponse, ListOrdersUseCase, OrderListItemDto};
pub use place_order::{PlaceOrderCommand, PlaceOrderResponse, PlaceOrderUseCase};
