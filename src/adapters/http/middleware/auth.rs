use actix_web::{
  Error, HttpMessage,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
  error::ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
  sync::Arc,
};

use crate::{
  adapters::http::errors::ApiError,
  domain::identity::{AuthenticatedUser, IdentityResolver},
};

/// Authentication middleware that verifies identity tokens and attaches the
/// resolved user to the request
///
/// This middleware:
/// 1. Extracts the token from the Authorization header (or the `token` cookie)
/// 2. Verifies it through the configured IdentityResolver
/// 3. Attaches the AuthenticatedUser to request extensions for downstream handlers
/// 4. Returns 401 Unauthorized if the token is missing or invalid
pub struct AuthMiddleware {
  resolver: Arc<dyn IdentityResolver>,
}

impl AuthMiddleware {
  pub fn new(resolver: Arc<dyn IdentityResolver>) -> Self {
    Self { resolver }
  }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Transform = AuthMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(AuthMiddlewareService {
      service: Rc::new(service),
      resolver: self.resolver.clone(),
    }))
  }
}

pub struct AuthMiddlewareService<S> {
  service: Rc<S>,
  resolver: Arc<dyn IdentityResolver>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);
    let resolver = self.resolver.clone();

    Box::pin(async move {
      let token = match extract_token(&req) {
        Ok(token) => token,
        Err(e) => {
          let (request, _) = req.into_parts();
          let response = e.error_response().map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      let user = match resolver.resolve(&token).await {
        Ok(user) => user,
        Err(e) => {
          let (request, _) = req.into_parts();
          let api_error: ApiError = e.into();
          let response = api_error.error_response().map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      req.extensions_mut().insert(user);

      let res = service.call(req).await?;
      Ok(res.map_into_left_body())
    })
  }
}

/// Extract the identity token from the Authorization header, falling back to
/// the `token` cookie for browser clients
fn extract_token(req: &ServiceRequest) -> Result<String, ApiError> {
  if let Some(token) = req
    .headers()
    .get("Authorization")
    .and_then(|h| h.to_str().ok())
    .and_then(|s| s.strip_prefix("Bearer "))
  {
    return Ok(token.to_string());
  }

  req
    .cookie("token")
    .map(|c| c.value().to_string())
    .ok_or_else(|| ApiError::Unauthorized("Missing authorization token".to_string()))
}

/// Extension trait to easily extract the authenticated user from a request
pub trait AuthUser {
  /// Get the authenticated user from request extensions
  ///
  /// # Panics
  ///
  /// Panics if the user is not present in extensions.
  /// This should only be called in handlers that are protected by AuthMiddleware.
  fn authenticated_user(&self) -> AuthenticatedUser;
}

impl AuthUser for actix_web::HttpRequest {
  fn authenticated_user(&self) -> AuthenticatedUser {
    self
      .extensions()
      .get::<AuthenticatedUser>()
      .cloned()
      .expect("User not found in request extensions. Did you forget to add AuthMiddleware?")
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::test::TestRequest;

  #[test]
  fn test_extract_token_from_header() {
    let req = TestRequest::default()
      .insert_header(("Authorization", "Bearer test_token_123"))
      .to_srv_request();

    let token = extract_token(&req).unwrap();
    assert_eq!(token, "test_token_123");
  }

  #[test]
  fn test_extract_token_from_cookie() {
    let req = TestRequest::default()
      .cookie(actix_web::cookie::Cookie::new("token", "cookie_token"))
      .to_srv_request();

    let token = extract_token(&req).unwrap();
    assert_eq!(token, "cookie_token");
  }

  #[test]
  fn test_extract_token_missing() {
    let req = TestRequest::default().to_srv_request();

    let result = extract_token(&req);
    assert!(result.is_err());
  }

  #[test]
  fn test_extract_token_invalid_scheme() {
    let req = TestRequest::default()
      .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
      .to_srv_request();

    let result = extract_token(&req);
    assert!(result.is_err());
  }
}
