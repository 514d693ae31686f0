use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use std::fmt;

use crate::domain::cart::CartError;
use crate::domain::identity::IdentityError;
use crate::domain::order::OrderError;

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum ApiError {
  /// Validation error (400 Bad Request)
  Validation(String),

  /// Rejected request with a specific error code (400 Bad Request)
  BadRequest { code: &'static str, message: String },

  /// Missing or invalid identity token (401 Unauthorized)
  Unauthorized(String),

  /// Actor lacks the capability (403 Forbidden)
  Forbidden(String),

  /// Resource does not exist (404 Not Found)
  NotFound { code: &'static str, message: String },

  /// Request conflicts with current state (409 Conflict)
  Conflict { code: &'static str, message: String },

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::BadRequest { message, .. } => write!(f, "Bad request: {}", message),
      ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
      ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
      ApiError::NotFound { message, .. } => write!(f, "Not found: {}", message),
      ApiError::Conflict { message, .. } => write!(f, "Conflict: {}", message),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) | ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
      ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
      ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
      ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
      ApiError::Conflict { .. } => StatusCode::CONFLICT,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone()),
      ApiError::BadRequest { code, message } => (*code, message.clone()),
      ApiError::Unauthorized(msg) => ("unauthorized", msg.clone()),
      ApiError::Forbidden(msg) => ("forbidden", msg.clone()),
      ApiError::NotFound { code, message } => (*code, message.clone()),
      ApiError::Conflict { code, message } => (*code, message.clone()),
      ApiError::Internal(msg) => {
        // Don't expose internal error details in production
        tracing::error!("Internal error: {}", msg);
        (
          "internal_error",
          "An internal server error occurred".to_string(),
        )
      }
    };

    let error_response = ErrorResponse {
      error: error_type.to_string(),
      message,
      details: None,
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(error_response)
  }
}

/// Convert OrderError to ApiError
impl From<OrderError> for ApiError {
  fn from(error: OrderError) -> Self {
    match error {
      OrderError::EmptyCart => ApiError::BadRequest {
        code: "empty_cart",
        message: "Cannot place an order from an empty cart".to_string(),
      },
      OrderError::InsufficientStock {
        product_id,
        available,
      } => ApiError::Conflict {
        code: "insufficient_stock",
        message: format!(
          "Not enough stock for product {}: {} available",
          product_id, available
        ),
      },
      OrderError::ProductUnavailable(id) => ApiError::Conflict {
        code: "product_unavailable",
        message: format!("Product {} is not available for ordering", id),
      },
      OrderError::OrderNotFound(id) => ApiError::NotFound {
        code: "order_not_found",
        message: format!("Order {} not found", id),
      },
      OrderError::UnknownStatus(status) => ApiError::BadRequest {
        code: "unknown_status",
        message: format!("Unknown order status: {}", status),
      },
      OrderError::InvalidTransition { current, requested } => ApiError::Conflict {
        code: "invalid_transition",
        message: format!("Order in status {} cannot move to {}", current, requested),
      },
      OrderError::PermissionDenied(msg) => ApiError::Forbidden(msg),
      OrderError::Validation(err) => ApiError::Validation(err.to_string()),
      OrderError::Cart(err) => ApiError::from(err),
      OrderError::Catalog(err) => ApiError::Internal(err.to_string()),
      OrderError::Database(err) => ApiError::Internal(err.to_string()),
      OrderError::Internal(msg) => ApiError::Internal(msg),
    }
  }
}

/// Convert CartError to ApiError
impl From<CartError> for ApiError {
  fn from(error: CartError) -> Self {
    match error {
      CartError::Validation(err) => ApiError::Validation(err.to_string()),
      CartError::ProductNotFound(id) => ApiError::NotFound {
        code: "product_not_found",
        message: format!("Product {} not found", id),
      },
      CartError::ProductUnavailable(id) => ApiError::Conflict {
        code: "product_unavailable",
        message: format!("Product {} is not available for ordering", id),
      },
      CartError::LineNotFound(id) => ApiError::NotFound {
        code: "cart_line_not_found",
        message: format!("No cart line for product {}", id),
      },
      CartError::InsufficientStock {
        product_id,
        available,
      } => ApiError::Conflict {
        code: "insufficient_stock",
        message: format!(
          "Not enough stock for product {}: {} available",
          product_id, available
        ),
      },
      CartError::Database(err) => ApiError::Internal(err.to_string()),
      CartError::Internal(msg) => ApiError::Internal(msg),
    }
  }
}

/// Convert IdentityError to ApiError
impl From<IdentityError> for ApiError {
  fn from(error: IdentityError) -> Self {
    match error {
      IdentityError::MalformedToken
      | IdentityError::InvalidSignature
      | IdentityError::TokenExpired
      | IdentityError::UnknownRole(_) => {
        ApiError::Unauthorized("Invalid or missing authorization token".to_string())
      }
    }
  }
}

/// Convert validation errors from validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();

    ApiError::Validation(messages.join(", "))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use uuid::Uuid;

  #[test]
  fn test_api_error_status_codes() {
    assert_eq!(
      ApiError::Validation("test".to_string()).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      ApiError::Unauthorized("test".to_string()).status_code(),
      StatusCode::UNAUTHORIZED
    );
    assert_eq!(
      ApiError::Forbidden("test".to_string()).status_code(),
      StatusCode::FORBIDDEN
    );
    assert_eq!(
      ApiError::Internal("test".to_string()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn test_order_error_conversion() {
    let api_error: ApiError = OrderError::EmptyCart.into();
    assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);

    let api_error: ApiError = OrderError::InsufficientStock {
      product_id: Uuid::new_v4(),
      available: 1,
    }
    .into();
    assert_eq!(api_error.status_code(), StatusCode::CONFLICT);

    let api_error: ApiError = OrderError::OrderNotFound(Uuid::new_v4()).into();
    assert_eq!(api_error.status_code(), StatusCode::NOT_FOUND);

    let api_error: ApiError = OrderError::UnknownStatus("returned".to_string()).into();
    assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);

    let api_error: ApiError = OrderError::PermissionDenied("no".to_string()).into();
    assert_eq!(api_error.status_code(), StatusCode::FORBIDDEN);
  }

  #[test]
  fn test_identity_error_maps_to_unauthorized() {
    let api_error: ApiError = IdentityError::TokenExpired.into();
    assert_eq!(api_error.status_code(), StatusCode::UNAUTHORIZED);
  }
}
