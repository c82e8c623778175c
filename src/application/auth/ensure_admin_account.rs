use std::sync::Arc;

use crate::domain::auth::entities::User;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Email, Password};

/// Administrator account described in configuration
#[derive(Debug, Clone)]
pub struct EnsureAdminAccountCommand {
  pub email: String,
  pub password: String,
  pub full_name: String,
}

#[derive(Debug)]
pub enum EnsureAdminAccountOutcome {
  Created(User),
  AlreadyExists,
}

/// Creates the bootstrap administrator unless the email is already registered.
///
/// Safe to run on every start-up.
pub struct EnsureAdminAccountUseCase {
  auth_service: Arc<AuthService>,
}

impl EnsureAdminAccountUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(
    &self,
    command: EnsureAdminAccountCommand,
  ) -> Result<EnsureAdminAccountOutcome, AuthError> {
    let email = Email::new(command.email)?;
    let password = Password::new(command.password)?;

    match self
      .auth_service
      .register(email, password, command.full_name)
      .await
    {
      Ok(user) => Ok(EnsureAdminAccountOutcome::Created(user)),
      Err(AuthError::EmailAlreadyExists) => Ok(EnsureAdminAccountOutcome::AlreadyExists),
      Err(e) => Err(e),
    }
  }
}
