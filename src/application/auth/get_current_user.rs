use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::SessionToken;
use crate::domain::navigation::UserIdentity;

/// Response containing current user information
#[derive(Debug, Clone)]
pub struct GetCurrentUserResponse {
  pub user_id: Uuid,
  pub identity: UserIdentity,
  pub created_at: DateTime<Utc>,
}

/// Use case for getting the current authenticated user
pub struct GetCurrentUserUseCase {
  auth_service: Arc<AuthService>,
}

impl GetCurrentUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Resolves a session token to the signed-in user
  ///
  /// # Errors
  /// Returns `AuthError` if the token is malformed, unknown or expired
  pub async fn execute(&self, session_token: String) -> Result<GetCurrentUserResponse, AuthError> {
    let token = SessionToken::from_string(session_token)?;
    let user = self.auth_service.validate_session(token).await?;

    Ok(GetCurrentUserResponse {
      user_id: user.id,
      identity: UserIdentity::from(&user),
      created_at: user.created_at,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::navigation::DEFAULT_AVATAR_URL;
  use crate::test_support::{self, ADMIN_EMAIL, ADMIN_NAME};

  #[tokio::test]
  async fn test_current_user_resolves_identity() {
    let fixture = test_support::seeded_fixture().await;
    let token = fixture.sign_in().await;
    let use_case = GetCurrentUserUseCase::new(fixture.auth_service.clone());

    let response = use_case.execute(token).await.unwrap();

    assert_eq!(response.user_id, fixture.admin.id);
    assert_eq!(response.identity.name, ADMIN_NAME);
    assert_eq!(response.identity.email, ADMIN_EMAIL);
    assert_eq!(response.identity.avatar_url, DEFAULT_AVATAR_URL);
  }

  #[tokio::test]
  async fn test_unknown_token_is_invalid_session() {
    let fixture = test_support::seeded_fixture().await;
    let use_case = GetCurrentUserUseCase::new(fixture.auth_service.clone());

    let result = use_case.execute("0".repeat(64)).await;
    assert!(matches!(result, Err(AuthError::InvalidSession)));
  }
}
