use actix_web::{
  Error, HttpMessage, ResponseError,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
  sync::Arc,
};

use crate::{
  adapters::http::errors::ApiError,
  application::auth::{GetCurrentUserResponse, GetCurrentUserUseCase},
};

/// Raw bearer token of the authenticated request, kept for logout
#[derive(Debug, Clone)]
pub struct AuthToken(pub String);

/// Bearer-token authentication middleware for the JSON API
///
/// This middleware:
/// 1. Extracts the session token from the `Authorization: Bearer` header
/// 2. Resolves it with `GetCurrentUserUseCase`
/// 3. Attaches the `GetCurrentUserResponse` and the `AuthToken` to request extensions
/// 4. Answers with a JSON error (401, or 503 when storage is down) otherwise
pub struct AuthMiddleware {
  get_user_use_case: Arc<GetCurrentUserUseCase>,
}

impl AuthMiddleware {
  pub fn new(get_user_use_case: Arc<GetCurrentUserUseCase>) -> Self {
    Self { get_user_use_case }
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
      get_user_use_case: self.get_user_use_case.clone(),
    }))
  }
}

pub struct AuthMiddlewareService<S> {
  service: Rc<S>,
  get_user_use_case: Arc<GetCurrentUserUseCase>,
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
    let get_user_use_case = self.get_user_use_case.clone();

    Box::pin(async move {
      let raw_token = match extract_session_token(&req) {
        Ok(token) => token,
        Err(e) => return Ok(req.error_response(e).map_into_right_body()),
      };

      let current_user = match get_user_use_case.execute(raw_token.clone()).await {
        Ok(current_user) => current_user,
        Err(e) => {
          let api_error = ApiError::from(e);
          let response = api_error.error_response();
          return Ok(req.into_response(response).map_into_right_body());
        }
      };

      req.extensions_mut().insert(current_user);
      req.extensions_mut().insert(AuthToken(raw_token));

      let res = service.call(req).await?;
      Ok(res.map_into_left_body())
    })
  }
}

/// Extract session token from Authorization header
fn extract_session_token(req: &ServiceRequest) -> Result<String, ApiError> {
  req
    .headers()
    .get("Authorization")
    .and_then(|h| h.to_str().ok())
    .and_then(|s| s.strip_prefix("Bearer "))
    .map(|s| s.trim().to_string())
    .filter(|s| !s.is_empty())
    .ok_or(ApiError::Unauthorized)
}

/// Extension trait for handlers behind `AuthMiddleware`
pub trait ApiPrincipal {
  /// The resolved user; None outside routes wrapped by `AuthMiddleware`
  fn current_user(&self) -> Option<GetCurrentUserResponse>;

  /// The bearer token the request was authenticated with
  fn auth_token(&self) -> Option<AuthToken>;
}

impl ApiPrincipal for actix_web::HttpRequest {
  fn current_user(&self) -> Option<GetCurrentUserResponse> {
    self.extensions().get::<GetCurrentUserResponse>().cloned()
  }

  fn auth_token(&self) -> Option<AuthToken> {
    self.extensions().get::<AuthToken>().cloned()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::test::TestRequest;

  #[test]
  fn test_extract_session_token_valid() {
    let req = TestRequest::default()
      .insert_header(("Authorization", "Bearer test_token_123"))
      .to_srv_request();

    let token = extract_session_token(&req).unwrap();
    assert_eq!(token, "test_token_123");
  }

  #[test]
  fn test_extract_session_token_missing() {
    let req = TestRequest::default().to_srv_request();

    assert!(extract_session_token(&req).is_err());
  }

  #[test]
  fn test_extract_session_token_invalid_format() {
    let req = TestRequest::default()
      .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
      .to_srv_request();

    assert!(extract_session_token(&req).is_err());
  }

  #[test]
  fn test_extract_session_token_empty_bearer() {
    let req = TestRequest::default()
      .insert_header(("Authorization", "Bearer "))
      .to_srv_request();

    assert!(extract_session_token(&req).is_err());
  }
}
