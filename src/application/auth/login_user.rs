use chrono::{DateTime, Utc};
use std::net::IpAddr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::{AuthError, ValidationError};
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Email, Password};

/// Credentials as submitted by the login form or the JSON API
#[derive(Debug, Clone)]
pub struct LoginUserCommand {
  pub email: String,
  pub password: String,
  /// Whether to create a long-lived session
  pub remember_me: bool,
}

/// Response after successful user login
#[derive(Debug, Clone)]
pub struct LoginUserResponse {
  pub user_id: Uuid,
  pub email: String,
  pub full_name: String,
  /// Plain session token; hand it to the client, never store it
  pub session_token: String,
  pub expires_at: DateTime<Utc>,
}

/// Use case for logging in a user
pub struct LoginUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LoginUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Validates the submitted credentials and opens a session
  ///
  /// # Errors
  /// - `AuthError::Validation` when a field is empty (the auth service is not called)
  /// - `AuthError::ValueObject` when the email is malformed
  /// - `AuthError::InvalidCredentials` for a wrong email/password pair
  /// - anything `AuthService::login` returns
  pub async fn execute(
    &self,
    command: LoginUserCommand,
    ip_address: Option<IpAddr>,
    user_agent: Option<String>,
  ) -> Result<LoginUserResponse, AuthError> {
    if command.email.trim().is_empty() {
      return Err(ValidationError::missing("email").into());
    }
    if command.password.is_empty() {
      return Err(ValidationError::missing("password").into());
    }

    let email = Email::new(command.email)?;

    // A password outside the length policy can never match a stored hash
    let password = Password::new(command.password).map_err(|_| AuthError::InvalidCredentials)?;

    let (user, session, session_token) = self
      .auth_service
      .login(email, password, ip_address, user_agent, command.remember_me)
      .await?;

    Ok(LoginUserResponse {
      user_id: user.id,
      email: user.email,
      full_name: user.full_name,
      session_token: session_token.into_inner(),
      expires_at: session.expires_at,
    })
  }
}
