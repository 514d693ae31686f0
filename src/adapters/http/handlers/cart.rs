use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{
  dtos::{AddToCartRequest, ReduceCartItemRequest, SuccessResponse},
  errors::ApiError,
  middleware::AuthUser,
};
use crate::application::cart::{
  AddToCartCommand, AddToCartUseCase, ClearCartCommand, ClearCartUseCase, GetCartCommand,
  GetCartUseCase, ReduceCartItemCommand, ReduceCartItemUseCase,
};

/// Handler for viewing the cart
///
/// GET /api/v1/cart
/// Response: GetCartResponse (JSON) with status 200
pub async fn get_cart_handler(
  http_req: HttpRequest,
  use_case: web::Data<Arc<GetCartUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = http_req.authenticated_user();

  let response = use_case
    .execute(GetCartCommand {
      user_id: user.user_id,
    })
    .await?;

  Ok(HttpResponse::Ok().json(response))
}

/// Handler for adding units of a product to the cart
///
/// POST /api/v1/cart/items
/// Body: AddToCartRequest (JSON)
/// Response: AddToCartResponse (JSON) with status 200
pub async fn add_to_cart_handler(
  http_req: HttpRequest,
  request: web::Json<AddToCartRequest>,
  use_case: web::Data<Arc<AddToCartUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let user = http_req.authenticated_user();

  let command = AddToCartCommand {
    user_id: user.user_id,
    product_id: request.product_id,
    count: request.count,
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(response))
}

/// Handler for reducing (or removing) a cart line
///
/// POST /api/v1/cart/items/reduce
/// Body: ReduceCartItemRequest (JSON)
/// Response: ReduceCartItemResponse (JSON) with status 200
pub async fn reduce_cart_item_handler(
  http_req: HttpRequest,
  request: web::Json<ReduceCartItemRequest>,
  use_case: web::Data<Arc<ReduceCartItemUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let user = http_req.authenticated_user();

  let command = ReduceCartItemCommand {
    user_id: user.user_id,
    product_id: request.product_id,
    count: request.count,
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(response))
}

/// Handler for emptying the cart
///
/// DELETE /api/v1/cart
/// Response: SuccessResponse (JSON) with status 200
pub async fn clear_cart_handler(
  http_req: HttpRequest,
  use_case: web::Data<Arc<ClearCartUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = http_req.authenticated_user();

  use_case
    .execute(ClearCartCommand {
      user_id: user.user_id,
    })
    .await?;

  Ok(HttpResponse::Ok().json(SuccessResponse {
    message: "Cart cleared".to_string(),
  }))
}
