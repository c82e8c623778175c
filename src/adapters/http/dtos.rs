use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::application::auth::{GetCurrentUserResponse, LoginUserResponse};

/// JSON login request
///
/// Emptiness is checked by the login use case so that the API and the form
/// report `missing_credentials` the same way; only size limits live here.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
  #[serde(default)]
  #[validate(length(max = 254, message = "Email must be at most 254 characters"))]
  pub email: String,

  #[serde(default)]
  #[validate(length(max = 1024, message = "Password must be at most 1024 characters"))]
  pub password: String,

  /// Whether to create a long-lived session
  #[serde(default)]
  pub remember_me: bool,
}

/// Login form fields posted by the login page
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
  #[serde(default)]
  pub email: String,
  #[serde(default)]
  pub password: String,
}

/// Response after successful login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
  pub success: bool,
  pub user_id: Uuid,
  pub email: String,
  pub full_name: String,
  pub session_token: String,
  pub expires_at: DateTime<Utc>,
}

impl From<LoginUserResponse> for LoginResponse {
  fn from(response: LoginUserResponse) -> Self {
    Self {
      success: true,
      user_id: response.user_id,
      email: response.email,
      full_name: response.full_name,
      session_token: response.session_token,
      expires_at: response.expires_at,
    }
  }
}

/// Response containing current user information
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
  pub user_id: Uuid,
  pub email: String,
  pub full_name: String,
  pub avatar_url: String,
  pub created_at: DateTime<Utc>,
}

impl From<GetCurrentUserResponse> for CurrentUserResponse {
  fn from(response: GetCurrentUserResponse) -> Self {
    Self {
      user_id: response.user_id,
      email: response.identity.email,
      full_name: response.identity.name,
      avatar_url: response.identity.avatar_url,
      created_at: response.created_at,
    }
  }
}

/// Standard success response for operations without data
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
  pub success: bool,
  pub message: String,
}

impl SuccessResponse {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      success: true,
      message: message.into(),
    }
  }
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  pub success: bool,

  /// Machine-readable error code, e.g. `invalid_credentials`
  pub error: String,

  /// Human-readable explanation
  pub reason: String,
}

impl ErrorResponse {
  pub fn new(error: impl Into<String>, reason: impl Into<String>) -> Self {
    Self {
      success: false,
      error: error.into(),
      reason: reason.into(),
    }
  }
}
