use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;

use crate::adapters::http::{dtos::ListOrdersQuery, errors::ApiError, middleware::AuthUser};
use crate::application::order::{
  ChangeOrderStatusCommand, ChangeOrderStatusUseCase, GetOrderDetailsCommand,
  GetOrderDetailsUseCase, ListOrdersCommand, ListOrdersUseCase, PlaceOrderCommand,
  PlaceOrderUseCase,
};
use crate::domain::order::OrderStatus;
use crate::infrastructure::config::PaginationConfig;

/// Handler for placing an order from the current cart
///
/// POST /api/v1/orders
/// Response: PlaceOrderResponse (JSON) with status 201
pub async fn place_order_handler(
  http_req: HttpRequest,
  use_case: web::Data<Arc<PlaceOrderUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = http_req.authenticated_user();

  let response = use_case
    .execute(PlaceOrderCommand {
      user_id: user.user_id,
    })
    .await?;

  Ok(HttpResponse::Created().json(response))
}

/// Handler for listing the caller's own orders, newest first
///
/// GET /api/v1/orders?page=1&per_page=10
/// Response: ListOrdersResponse (JSON) with status 200
pub async fn list_my_orders_handler(
  http_req: HttpRequest,
  query: web::Query<ListOrdersQuery>,
  use_case: web::Data<Arc<ListOrdersUseCase>>,
  pagination: web::Data<PaginationConfig>,
) -> Result<HttpResponse, ApiError> {
  let user = http_req.authenticated_user();
  let per_page = clamp_per_page(query.per_page, &pagination);

  let command = ListOrdersCommand {
    owner_id: user.user_id,
    actor: user,
    page: query.page,
    per_page,
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(response))
}

/// Handler for viewing a single order
///
/// GET /api/v1/orders/{order_id}
/// Response: OrderDetailsResponse (JSON) with status 200
pub async fn get_order_handler(
  http_req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetOrderDetailsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = http_req.authenticated_user();
  let order_id = path.into_inner();

  let response = use_case
    .execute(GetOrderDetailsCommand {
      actor: user,
      order_id,
    })
    .await?;

  Ok(HttpResponse::Ok().json(response))
}

/// Handler for cancelling one's own order while it is still being designed
///
/// POST /api/v1/orders/{order_id}/cancel
/// Response: ChangeOrderStatusResponse (JSON) with status 200
pub async fn cancel_order_handler(
  http_req: HttpRequest,
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<ChangeOrderStatusUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = http_req.authenticated_user();
  let order_id = path.into_inner();

  let command = ChangeOrderStatusCommand {
    actor: user,
    order_id,
    new_status: OrderStatus::Cancelled.as_str().to_string(),
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(response))
}

pub(super) fn clamp_per_page(requested: Option<i64>, pagination: &PaginationConfig) -> i64 {
  requested
    .unwrap_or(pagination.page_size)
    .clamp(1, pagination.max_page_size)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_clamp_per_page() {
    let pagination = PaginationConfig {
      page_size: 10,
      max_page_size: 50,
    };

    assert_eq!(clamp_per_page(None, &pagination), 10);
    assert_eq!(clamp_per_page(Some(25), &pagination), 25);
    assert_eq!(clamp_per_page(Some(500), &pagination), 50);
    assert_eq!(clamp_per_page(Some(0), &pagination), 1);
  }
}
