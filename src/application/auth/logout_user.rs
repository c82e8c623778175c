use std::sync::Arc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::SessionToken;

/// Use case for logging out a user
pub struct LogoutUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LogoutUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Revokes the session identified by `session_token`
  ///
  /// # Errors
  /// Returns `AuthError` if the token is malformed or the session is unknown
  pub async fn execute(&self, session_token: String) -> Result<(), AuthError> {
    let token = SessionToken::from_string(session_token)?;
    self.auth_service.logout(token).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::auth::{LoginUserCommand, LoginUserUseCase};
  use crate::test_support::{self, ADMIN_EMAIL, ADMIN_PASSWORD};

  #[tokio::test]
  async fn test_logout_revokes_session() {
    let fixture = test_support::seeded_fixture().await;
    let login = LoginUserUseCase::new(fixture.auth_service.clone());
    let logout = LogoutUserUseCase::new(fixture.auth_service.clone());

    let response = login
      .execute(
        LoginUserCommand {
          email: ADMIN_EMAIL.to_string(),
          password: ADMIN_PASSWORD.to_string(),
          remember_me: false,
        },
        None,
        None,
      )
      .await
      .unwrap();

    logout.execute(response.session_token.clone()).await.unwrap();
    assert_eq!(fixture.sessions.len(), 0);

    assert!(matches!(
      logout.execute(response.session_token).await,
      Err(AuthError::InvalidSession)
    ));
  }

  #[tokio::test]
  async fn test_logout_rejects_malformed_token() {
    let fixture = test_support::seeded_fixture().await;
    let logout = LogoutUserUseCase::new(fixture.auth_service.clone());

    assert!(matches!(
      logout.execute("nope".to_string()).await,
      Err(AuthError::ValueObject(_))
    ));
  }
}
