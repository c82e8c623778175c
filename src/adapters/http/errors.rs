use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use std::fmt;

use crate::domain::auth::errors::{AuthError, ValidationError};
use crate::domain::auth::value_objects::ValueObjectError;

use super::dtos::ErrorResponse;

/// Why a login attempt was refused, as shown to the person signing in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginErrorKind {
  MissingCredentials,
  InvalidEmail,
  InvalidCredentials,
  RateLimited,
  ServiceUnavailable,
  ServerError,
}

impl LoginErrorKind {
  /// Classifies an error returned by the login use case
  pub fn from_auth_error(error: &AuthError) -> Self {
    match error {
      AuthError::Validation(ValidationError::MissingField { .. }) => Self::MissingCredentials,
      AuthError::ValueObject(ValueObjectError::InvalidEmail(_)) => Self::InvalidEmail,
      AuthError::ValueObject(
        ValueObjectError::PasswordTooShort | ValueObjectError::PasswordTooLong,
      )
      | AuthError::InvalidCredentials => Self::InvalidCredentials,
      AuthError::RateLimitExceeded => Self::RateLimited,
      e if e.is_unavailable() => Self::ServiceUnavailable,
      _ => Self::ServerError,
    }
  }

  pub fn code(&self) -> &'static str {
    match self {
      Self::MissingCredentials => "missing_credentials",
      Self::InvalidEmail => "invalid_email",
      Self::InvalidCredentials => "invalid_credentials",
      Self::RateLimited => "rate_limited",
      Self::ServiceUnavailable => "service_unavailable",
      Self::ServerError => "server_error",
    }
  }

  pub fn message(&self) -> &'static str {
    match self {
      Self::MissingCredentials => "Email and password are required",
      Self::InvalidEmail => "Enter a valid email address",
      Self::InvalidCredentials => "Invalid email or password",
      Self::RateLimited => "Too many login attempts. Please try again later",
      Self::ServiceUnavailable => "The sign-in service is unavailable. Please try again shortly",
      Self::ServerError => "Something went wrong. Please try again",
    }
  }

  pub fn status_code(&self) -> StatusCode {
    match self {
      Self::MissingCredentials | Self::InvalidEmail => StatusCode::BAD_REQUEST,
      Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
      Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
      Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
      Self::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

/// API error type that maps domain errors to HTTP responses
#[derive(Debug)]
pub enum ApiError {
  /// Request body failed validation (400)
  Validation(String),

  /// Login refused; status follows the kind
  Login(LoginErrorKind),

  /// Missing, malformed, unknown or expired session token (401)
  Unauthorized,

  /// Storage backend unreachable (503)
  Unavailable(String),

  /// Internal server error (500)
  Internal(String),
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::Login(kind) => write!(f, "Login error: {}", kind.code()),
      ApiError::Unauthorized => write!(f, "Unauthorized"),
      ApiError::Unavailable(msg) => write!(f, "Service unavailable: {}", msg),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::Login(kind) => kind.status_code(),
      ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
      ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let body = match self {
      ApiError::Validation(msg) => ErrorResponse::new("validation_error", msg.clone()),
      ApiError::Login(kind) => ErrorResponse::new(kind.code(), kind.message()),
      ApiError::Unauthorized => {
        ErrorResponse::new("invalid_session", "Invalid or expired session")
      }
      ApiError::Unavailable(msg) => {
        tracing::warn!("Service unavailable: {}", msg);
        let kind = LoginErrorKind::ServiceUnavailable;
        ErrorResponse::new(kind.code(), kind.message())
      }
      ApiError::Internal(msg) => {
        // Don't expose internal error details
        tracing::error!("Internal error: {}", msg);
        let kind = LoginErrorKind::ServerError;
        ErrorResponse::new(kind.code(), kind.message())
      }
    };

    HttpResponse::build(self.status_code())
      .content_type(ContentType::json())
      .json(body)
  }
}

/// Maps errors from session-bound operations (logout, current user)
impl From<AuthError> for ApiError {
  fn from(error: AuthError) -> Self {
    match error {
      AuthError::InvalidSession
      | AuthError::UserNotFound
      | AuthError::ValueObject(ValueObjectError::InvalidToken) => ApiError::Unauthorized,
      e if e.is_unavailable() => ApiError::Unavailable(e.to_string()),
      e => ApiError::Internal(e.to_string()),
    }
  }
}

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
