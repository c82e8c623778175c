//! Shared fixtures for tests: an `AuthService` wired to in-memory adapters.

use std::sync::Arc;

use crate::domain::auth::{AuthService, AuthServiceConfig, Email, Password, User};
use crate::infrastructure::persistence::memory::{
  InMemoryLoginAttemptRepository, InMemorySessionRepository, InMemoryUserRepository,
};
use crate::infrastructure::security::{Argon2PasswordHasher, SecureTokenGenerator};

pub const ADMIN_EMAIL: &str = "admin@quizku.id";
pub const ADMIN_PASSWORD: &str = "correct-horse-battery";
pub const ADMIN_NAME: &str = "Jacob Jones";

pub struct Fixture {
  pub auth_service: Arc<AuthService>,
  pub users: Arc<InMemoryUserRepository>,
  pub sessions: Arc<InMemorySessionRepository>,
  pub attempts: Arc<InMemoryLoginAttemptRepository>,
  pub admin: User,
}

impl Fixture {
  /// Logs the seeded admin in and returns the raw session token
  pub async fn sign_in(&self) -> String {
    let (_, _, token) = self
      .auth_service
      .login(
        Email::new(ADMIN_EMAIL).unwrap(),
        Password::new(ADMIN_PASSWORD).unwrap(),
        None,
        None,
        false,
      )
      .await
      .unwrap();
    token.into_inner()
  }
}

/// Fixture with no accounts; `admin` is a placeholder that is not stored
pub fn empty_fixture() -> Fixture {
  let users = Arc::new(InMemoryUserRepository::default());
  let sessions = Arc::new(InMemorySessionRepository::default());
  let attempts = Arc::new(InMemoryLoginAttemptRepository::default());
  // Minimal Argon2 cost keeps the suite fast
  let hasher = Argon2PasswordHasher::with_params(8, 1, 1).unwrap();

  let auth_service = Arc::new(AuthService::new(
    users.clone(),
    sessions.clone(),
    attempts.clone(),
    Arc::new(hasher),
    Arc::new(SecureTokenGenerator::new()),
    AuthServiceConfig::default(),
  ));

  Fixture {
    auth_service,
    users,
    sessions,
    attempts,
    admin: User::new(ADMIN_EMAIL.to_string(), String::new(), ADMIN_NAME.to_string()),
  }
}

/// Fixture with the admin account registered
pub async fn seeded_fixture() -> Fixture {
  let mut fixture = empty_fixture();
  fixture.admin = fixture
    .auth_service
    .register(
      Email::new(ADMIN_EMAIL).unwrap(),
      Password::new(ADMIN_PASSWORD).unwrap(),
      ADMIN_NAME.to_string(),
    )
    .await
    .unwrap();
  fixture
}
