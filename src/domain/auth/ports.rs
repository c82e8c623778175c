use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{LoginAttempt, Session, User};
use super::errors::AuthError;
use super::value_objects::{Email, Password, PasswordHash, SessionToken};

/// Repository trait for user persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// Creates a new user in the repository
  async fn create(&self, user: User) -> Result<User, AuthError>;

  /// Finds a user by their unique identifier
  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError>;

  /// Finds a user by their (normalised) email address
  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError>;

  /// Counts registered users
  async fn count(&self) -> Result<i64, AuthError>;

  /// Lists users, newest first, at most `limit` of them
  async fn list(&self, limit: i64) -> Result<Vec<User>, AuthError>;
}

/// Repository trait for session persistence operations
#[async_trait]
pub trait SessionRepository: Send + Sync {
  /// Creates a new session in the repository
  async fn create(&self, session: Session) -> Result<Session, AuthError>;

  /// Finds a session by its token hash
  async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AuthError>;

  /// Deletes a specific session
  async fn delete(&self, session_id: Uuid) -> Result<(), AuthError>;

  /// Deletes every session whose expiry has passed, returning how many were removed
  async fn delete_expired(&self) -> Result<u64, AuthError>;
}

/// Repository trait for login attempt tracking operations
#[async_trait]
pub trait LoginAttemptRepository: Send + Sync {
  /// Records a new login attempt
  async fn create(&self, attempt: LoginAttempt) -> Result<LoginAttempt, AuthError>;

  /// Counts failed attempts for an email within the last `window_seconds`
  async fn count_recent_failures(&self, email: &Email, window_seconds: i64)
  -> Result<i64, AuthError>;

  /// Deletes attempts older than `window_seconds`, returning how many were removed
  async fn delete_older_than(&self, window_seconds: i64) -> Result<u64, AuthError>;
}

/// Service trait for password hashing operations
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  /// Hashes a plain text password
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError>;

  /// Verifies a plain text password against a hashed password
  async fn verify(
    &self,
    password: &Password,
    hashed_password: &PasswordHash,
  ) -> Result<bool, AuthError>;
}

/// Service trait for secure token generation
#[async_trait]
pub trait TokenGenerator: Send + Sync {
  /// Generates a fresh, unguessable session token
  async fn generate(&self) -> Result<SessionToken, AuthError>;
}
