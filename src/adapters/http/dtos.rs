use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request to add units of a product to the cart
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddToCartRequest {
  /// Product to add
  pub product_id: Uuid,

  /// How many units to add; sums into an existing line
  #[validate(range(min = 1, message = "Count must be at least 1"))]
  pub count: i64,
}

/// Request to reduce a cart line
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReduceCartItemRequest {
  /// Product whose line to reduce
  pub product_id: Uuid,

  /// How many units to remove
  #[validate(range(min = 1, message = "Count must be at least 1"))]
  pub count: i64,
}

/// Request to move an order to a new status
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangeOrderStatusRequest {
  /// Target status name, e.g. "on_assembly"
  #[validate(length(min = 1, message = "Status is required"))]
  pub status: String,
}

/// Page selection for order listings
#[derive(Debug, Clone, Deserialize)]
pub struct ListOrdersQuery {
  #[serde(default = "default_page")]
  pub page: i64,
  pub per_page: Option<i64>,
}

fn default_page() -> i64 {
  1
}

/// Standard success response for operations without data
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
  /// Success message
  pub message: String,
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,

  /// Optional detailed error information
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use validator::Validate;

  #[test]
  fn test_add_to_cart_request_validation() {
    let request = AddToCartRequest {
      product_id: Uuid::new_v4(),
      count: 2,
    };
    assert!(request.validate().is_ok());

    let request = AddToCartRequest {
      product_id: Uuid::new_v4(),
      count: 0,
    };
    assert!(request.validate().is_err());
  }

  #[test]
  fn test_change_status_request_validation() {
    let request = ChangeOrderStatusRequest {
      status: "sent".to_string(),
    };
    assert!(request.validate().is_ok());

    let request = ChangeOrderStatusRequest {
      status: String::new(),
    };
    assert!(request.validate().is_err());
  }

  #[test]
  fn test_list_orders_query_page_default() {
    let query: ListOrdersQuery = serde_json::from_str("{}").unwrap();
    assert_eq!(query.page, 1);
    assert!(query.per_page.is_none());
  }
}
