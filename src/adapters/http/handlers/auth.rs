use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use super::{extract_ip_address, extract_user_agent};
use crate::adapters::http::{
  dtos::{CurrentUserResponse, LoginRequest, LoginResponse, SuccessResponse},
  errors::{ApiError, LoginErrorKind},
  middleware::ApiPrincipal,
};
use crate::application::auth::{LoginUserCommand, LoginUserUseCase, LogoutUserUseCase};

/// Handler for user login
///
/// POST /api/v1/auth/login
/// Body: LoginRequest (JSON)
/// Response: LoginResponse (JSON) with status 200, or
/// `{success: false, error, reason}` with the status of the failure kind
pub async fn login_handler(
  request: web::Json<LoginRequest>,
  use_case: web::Data<Arc<LoginUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let command = LoginUserCommand {
    email: request.email,
    password: request.password,
    remember_me: request.remember_me,
  };

  let response = use_case
    .execute(
      command,
      extract_ip_address(&http_req),
      extract_user_agent(&http_req),
    )
    .await
    .map_err(|e| match LoginErrorKind::from_auth_error(&e) {
      LoginErrorKind::ServerError => ApiError::Internal(e.to_string()),
      kind => ApiError::Login(kind),
    })?;

  Ok(HttpResponse::Ok().json(LoginResponse::from(response)))
}

/// Handler for user logout
///
/// POST /api/v1/auth/logout
/// Headers: Authorization: Bearer <token>
pub async fn logout_handler(
  use_case: web::Data<Arc<LogoutUserUseCase>>,
  req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let token = req.auth_token().ok_or(ApiError::Unauthorized)?;

  use_case.execute(token.0).await?;

  Ok(HttpResponse::Ok().json(SuccessResponse::new("Logged out")))
}

/// Handler for the current user
///
/// GET /api/v1/auth/me
/// Headers: Authorization: Bearer <token>
pub async fn get_current_user_handler(req: HttpRequest) -> Result<HttpResponse, ApiError> {
  let current_user = req.current_user().ok_or(ApiError::Unauthorized)?;

  Ok(HttpResponse::Ok().json(CurrentUserResponse::from(current_user)))
}
