use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::{
  dtos::{ChangeOrderStatusRequest, ListOrdersQuery},
  errors::ApiError,
  middleware::AuthUser,
};
use crate::application::order::{
  ChangeOrderStatusCommand, ChangeOrderStatusUseCase, GetOrderDetailsCommand,
  GetOrderDetailsUseCase, ListOrdersCommand, ListOrdersUseCase,
};
use crate::infrastructure::config::PaginationConfig;

use super::orders::clamp_per_page;

/// Handler for moving an order through its lifecycle
///
/// Capability checks live in the order service: staff may progress any
/// order, and a customer hitting this endpoint can only cancel their own.
///
/// POST /api/v1/back-office/orders/{order_id}/status
/// Body: ChangeOrderStatusRequest (JSON)
/// Response: ChangeOrderStatusResponse (JSON) with status 200
pub async fn change_order_status_handler(
  http_req: HttpRequest,
  path: web::Path<Uuid>,
  request: web::Json<ChangeOrderStatusRequest>,
  use_case: web::Data<Arc<ChangeOrderStatusUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let user = http_req.authenticated_user();
  let order_id = path.into_inner();

  let command = ChangeOrderStatusCommand {
    actor: user,
    order_id,
    new_status: request.status.clone(),
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(response))
}

/// Handler for inspecting any order
///
/// GET /api/v1/back-office/orders/{order_id}
/// Response: OrderDetailsResponse (JSON) with status 200
pub async fn get_any_order_handler(
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

/// Handler for listing a customer's orders
///
/// GET /api/v1/back-office/users/{user_id}/orders?page=1&per_page=10
/// Response: ListOrdersResponse (JSON) with status 200
pub async fn list_user_orders_handler(
  http_req: HttpRequest,
  path: web::Path<Uuid>,
  query: web::Query<ListOrdersQuery>,
  use_case: web::Data<Arc<ListOrdersUseCase>>,
  pagination: web::Data<PaginationConfig>,
) -> Result<HttpResponse, ApiError> {
  let user = http_req.authenticated_user();
  let owner_id = path.into_inner();
  let per_page = clamp_per_page(query.per_page, &pagination);

  let command = ListOrdersCommand {
    actor: user,
    owner_id,
    page: query.page,
    per_page,
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(response))
}
