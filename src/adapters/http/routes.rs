use actix_web::web;
use std::sync::Arc;

use crate::application::cart::{
  AddToCartUseCase, ClearCartUseCase, GetCartUseCase, ReduceCartItemUseCase,
};
use crate::application::order::{
  ChangeOrderStatusUseCase, GetOrderDetailsUseCase, ListOrdersUseCase, PlaceOrderUseCase,
};

use super::handlers::back_office::{
  change_order_status_handler, get_any_order_handler, list_user_orders_handler,
};
use super::handlers::cart::{
  add_to_cart_handler, clear_cart_handler, get_cart_handler, reduce_cart_item_handler,
};
use super::handlers::orders::{
  cancel_order_handler, get_order_handler, list_my_orders_handler, place_order_handler,
};

/// Configure cart routes
///
/// Mounts all cart endpoints under the provided scope.
/// All routes are prefixed with the scope path (e.g., /api/v1/cart).
///
/// # Routes
///
/// - GET / - View the cart
/// - DELETE / - Empty the cart
/// - POST /items - Add units of a product
/// - POST /items/reduce - Remove units of a product
pub fn configure_cart_routes(
  cfg: &mut web::ServiceConfig,
  get_cart_use_case: Arc<GetCartUseCase>,
  add_use_case: Arc<AddToCartUseCase>,
  reduce_use_case: Arc<ReduceCartItemUseCase>,
  clear_use_case: Arc<ClearCartUseCase>,
) {
  // Store use cases in app data so handlers can access them
  cfg
    .app_data(web::Data::new(get_cart_use_case))
    .app_data(web::Data::new(add_use_case))
    .app_data(web::Data::new(reduce_use_case))
    .app_data(web::Data::new(clear_use_case))
    .route("", web::get().to(get_cart_handler))
    .route("", web::delete().to(clear_cart_handler))
    .route("/items", web::post().to(add_to_cart_handler))
    .route("/items/reduce", web::post().to(reduce_cart_item_handler));
}

/// Configure storefront order routes
///
/// Mounts customer-facing order endpoints under the provided scope
/// (e.g., /api/v1/orders).
///
/// # Routes
///
/// - POST / - Place an order from the current cart
/// - GET / - List own orders, newest first
/// - GET /:order_id - View a single order
/// - POST /:order_id/cancel - Cancel an order still being designed
pub fn configure_order_routes(
  cfg: &mut web::ServiceConfig,
  place_use_case: Arc<PlaceOrderUseCase>,
  list_use_case: Arc<ListOrdersUseCase>,
  details_use_case: Arc<GetOrderDetailsUseCase>,
  change_status_use_case: Arc<ChangeOrderStatusUseCase>,
) {
  cfg
    .app_data(web::Data::new(place_use_case))
    .app_data(web::Data::new(list_use_case))
    .app_data(web::Data::new(details_use_case))
    .app_data(web::Data::new(change_status_use_case))
    .route("", web::post().to(place_order_handler))
    .route("", web::get().to(list_my_orders_handler))
    .route("/{order_id}", web::get().to(get_order_handler))
    .route("/{order_id}/cancel", web::post().to(cancel_order_handler));
}

/// Configure back-office routes
///
/// Mounts staff endpoints under the provided scope
/// (e.g., /api/v1/back-office). The order service rejects callers without
/// the staff capability, so these share the regular auth middleware.
///
/// # Routes
///
/// - POST /orders/:order_id/status - Move an order through its lifecycle
/// - GET /orders/:order_id - Inspect any order
/// - GET /users/:user_id/orders - List a customer's orders
pub fn configure_back_office_routes(
  cfg: &mut web::ServiceConfig,
  change_status_use_case: Arc<ChangeOrderStatusUseCase>,
  details_use_case: Arc<GetOrderDetailsUseCase>,
  list_use_case: Arc<ListOrdersUseCase>,
) {
  cfg
    .app_data(web::Data::new(change_status_use_case))
    .app_data(web::Data::new(details_use_case))
    .app_data(web::Data::new(list_use_case))
    .route(
      "/orders/{order_id}/status",
      web::post().to(change_order_status_handler),
    )
    .route("/orders/{order_id}", web::get().to(get_any_order_handler))
    .route(
      "/users/{user_id}/orders",
      web::get().to(list_user_orders_handler),
    );
}
