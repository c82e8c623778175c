use thiserror::Error;

use super::value_objects::ValueObjectError;

/// Main authentication error type
#[derive(Debug, Error)]
pub enum AuthError {
  #[error("Invalid credentials provided")]
  InvalidCredentials,

  #[error("Email already exists")]
  EmailAlreadyExists,

  #[error("User not found")]
  UserNotFound,

  #[error("Invalid or expired session")]
  InvalidSession,

  #[error("Rate limit exceeded, please try again later")]
  RateLimitExceeded,

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),

  #[error("Hash error: {0}")]
  Hash(#[from] HashError),

  #[error("Validation error: {0}")]
  Validation(#[from] ValidationError),

  #[error("Value object error: {0}")]
  ValueObject(#[from] ValueObjectError),
}

impl AuthError {
  /// True when the failure comes from the storage backend being unreachable
  pub fn is_unavailable(&self) -> bool {
    matches!(
      self,
      AuthError::Repository(RepositoryError::ConnectionFailed(_))
    )
  }
}

/// Repository-related errors
#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error("Database connection failed: {0}")]
  ConnectionFailed(String),

  #[error("Query execution failed: {0}")]
  QueryFailed(String),

  #[error("Record not found")]
  NotFound,

  #[error("Duplicate key violation: {0}")]
  DuplicateKey(String),

  #[error("Database error: {0}")]
  DatabaseError(String),
}

/// Password hashing and verification errors
#[derive(Debug, Error)]
pub enum HashError {
  #[error("Failed to hash password: {0}")]
  HashingFailed(String),

  #[error("Failed to verify password: {0}")]
  VerificationFailed(String),
}

/// Input validation errors
#[derive(Debug, Error)]
pub enum ValidationError {
  #[error("Missing required field: {field}")]
  MissingField { field: String },
}

impl ValidationError {
  pub fn missing(field: &str) -> Self {
    ValidationError::MissingField {
      field: field.to_string(),
    }
  }
}

// Automatic conversions from external error types

impl From<sqlx::Error> for RepositoryError {
  fn from(error: sqlx::Error) -> Self {
    match error {
      sqlx::Error::RowNotFound => RepositoryError::NotFound,
      sqlx::Error::Database(db_err) => {
        if db_err.is_unique_violation() {
          RepositoryError::DuplicateKey(db_err.message().to_string())
        } else {
          RepositoryError::DatabaseError(db_err.message().to_string())
        }
      }
      sqlx::Error::PoolTimedOut => RepositoryError::ConnectionFailed("Pool timed out".to_string()),
      sqlx::Error::PoolClosed => RepositoryError::ConnectionFailed("Pool closed".to_string()),
      sqlx::Error::Io(io_err) => RepositoryError::ConnectionFailed(io_err.to_string()),
      sqlx::Error::Tls(tls_err) => RepositoryError::ConnectionFailed(tls_err.to_string()),
      _ => RepositoryError::QueryFailed(error.to_string()),
    }
  }
}

impl From<sqlx::Error> for AuthError {
  fn from(error: sqlx::Error) -> Self {
    AuthError::Repository(RepositoryError::from(error))
  }
}
