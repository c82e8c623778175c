use actix_web::{
  Error, HttpMessage, HttpResponse,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
  http::header,
};
use futures_util::future::LocalBoxFuture;
use std::{future::ready, rc::Rc, sync::Arc};

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::SessionToken;

/// Name of the cookie carrying the opaque session token
pub const SESSION_COOKIE: &str = "session_token";

/// Web authentication middleware using cookie-based sessions
///
/// Resolves the session cookie to a `User` placed in request extensions.
/// Anonymous or stale sessions are redirected to `/login`.
pub struct WebAuthMiddleware {
  auth_service: Arc<AuthService>,
}

impl WebAuthMiddleware {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }
}

impl<S, B> Transform<S, ServiceRequest> for WebAuthMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type InitError = ();
  type Transform = WebAuthMiddlewareService<S>;
  type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(WebAuthMiddlewareService {
      service: Rc::new(service),
      auth_service: self.auth_service.clone(),
    }))
  }
}

pub struct WebAuthMiddlewareService<S> {
  service: Rc<S>,
  auth_service: Arc<AuthService>,
}

impl<S, B> Service<ServiceRequest> for WebAuthMiddlewareService<S>
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
    let token = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());

    let auth_service = self.auth_service.clone();
    let service = Rc::clone(&self.service);

    Box::pin(async move {
      let Some(token_str) = token else {
        return Ok(req.into_response(redirect_to_login()).map_into_right_body());
      };

      let validated = match SessionToken::from_string(token_str) {
        Ok(session_token) => auth_service.validate_session(session_token).await,
        Err(e) => Err(AuthError::from(e)),
      };

      match validated {
        Ok(user) => {
          req.extensions_mut().insert(user);
          let res = service.call(req).await?;
          Ok(res.map_into_left_body())
        }
        Err(e) if e.is_unavailable() => {
          tracing::error!("Session lookup failed, storage unavailable: {}", e);
          let res = req.into_response(
            HttpResponse::ServiceUnavailable()
              .content_type("text/plain; charset=utf-8")
              .body("Service temporarily unavailable"),
          );
          Ok(res.map_into_right_body())
        }
        Err(e) => {
          tracing::debug!("Rejecting web session: {}", e);
          Ok(req.into_response(redirect_to_login()).map_into_right_body())
        }
      }
    })
  }
}

fn redirect_to_login() -> HttpResponse {
  HttpResponse::Found()
    .insert_header((header::LOCATION, "/login"))
    .finish()
}
