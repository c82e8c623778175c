use argon2::PasswordHash as Argon2PasswordHash;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use validator::ValidateEmail;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ValueObjectError {
  #[error("Invalid email format: {0}")]
  InvalidEmail(String),

  #[error("Password is too short (minimum 8 characters)")]
  PasswordTooShort,

  #[error("Password is too long (maximum 128 characters)")]
  PasswordTooLong,

  #[error("Invalid password hash format")]
  InvalidPasswordHash,

  #[error("Invalid token format")]
  InvalidToken,
}

// ============================================================================
// Email Value Object
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
  /// Creates a new Email after validation, trimmed and lowercased
  pub fn new(email: impl Into<String>) -> Result<Self, ValueObjectError> {
    let email = email.into();
    let trimmed = email.trim();

    if !trimmed.validate_email() {
      return Err(ValueObjectError::InvalidEmail(email));
    }

    Ok(Self(trimmed.to_lowercase()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<str> for Email {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

// ============================================================================
// Password Value Object (Plain Password - Never Stored)
// ============================================================================

/// Plain-text password as typed by the user. Wiped from memory on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
  const MIN_LENGTH: usize = 8;
  const MAX_LENGTH: usize = 128;

  /// Creates a new Password after checking the length policy
  pub fn new(password: impl Into<String>) -> Result<Self, ValueObjectError> {
    let password = password.into();

    if password.len() < Self::MIN_LENGTH {
      return Err(ValueObjectError::PasswordTooShort);
    }

    if password.len() > Self::MAX_LENGTH {
      return Err(ValueObjectError::PasswordTooLong);
    }

    Ok(Self(password))
  }

  /// Returns the password as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

// ============================================================================
// PasswordHash Value Object (Argon2id PHC string)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordHash(String);

impl PasswordHash {
  /// Wraps an existing PHC hash string after checking that it parses
  pub fn from_hash(hash: impl Into<String>) -> Result<Self, ValueObjectError> {
    let hash = hash.into();

    Argon2PasswordHash::new(&hash).map_err(|_| ValueObjectError::InvalidPasswordHash)?;

    Ok(Self(hash))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

// ============================================================================
// SessionToken Value Object (Random Secure Token)
// ============================================================================

/// Opaque session token handed to the browser. Only its hash is persisted.
#[derive(Clone)]
pub struct SessionToken(String);

impl SessionToken {
  pub const BYTE_LENGTH: usize = 32;

  /// Builds a token from raw random bytes
  pub fn from_bytes(bytes: [u8; Self::BYTE_LENGTH]) -> Self {
    Self(hex::encode(bytes))
  }

  /// Parses a token received from a cookie or Authorization header
  pub fn from_string(token: impl Into<String>) -> Result<Self, ValueObjectError> {
    let token = token.into();

    if token.len() != Self::BYTE_LENGTH * 2 || !token.chars().all(|c| c.is_ascii_hexdigit()) {
      return Err(ValueObjectError::InvalidToken);
    }

    Ok(Self(token.to_ascii_lowercase()))
  }

  /// SHA-256 of the token, hex encoded, for storage
  pub fn hash(&self) -> TokenHash {
    use sha2::{Digest, Sha256};

    let digest = Sha256::digest(self.0.as_bytes());
    TokenHash(hex::encode(digest))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Debug for SessionToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("SessionToken(***)")
  }
}

// ============================================================================
// TokenHash Value Object (SHA-256 Hash of Token)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHash(String);

impl TokenHash {
  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for TokenHash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_email_validation() {
    assert!(Email::new("admin@quizku.id").is_ok());
    assert!(Email::new("user.name@domain.co.uk").is_ok());

    assert!(Email::new("invalid").is_err());
    assert!(Email::new("@example.com").is_err());
    assert!(Email::new("test@").is_err());
    assert!(Email::new("").is_err());
  }

  #[test]
  fn test_email_normalization() {
    let email = Email::new("  Jacob@Gmail.COM ").unwrap();
    assert_eq!(email.as_str(), "jacob@gmail.com");
  }

  #[test]
  fn test_password_length_policy() {
    assert!(Password::new("password123").is_ok());

    assert!(matches!(
      Password::new("short"),
      Err(ValueObjectError::PasswordTooShort)
    ));

    let long_password = "a".repeat(129);
    assert!(matches!(
      Password::new(long_password),
      Err(ValueObjectError::PasswordTooLong)
    ));
  }

  #[test]
  fn test_password_debug_is_redacted() {
    let password = Password::new("supersecret").unwrap();
    assert_eq!(format!("{:?}", password), "Password(***)");
  }

  #[test]
  fn test_password_hash_rejects_garbage() {
    assert!(matches!(
      PasswordHash::from_hash("not-a-phc-string"),
      Err(ValueObjectError::InvalidPasswordHash)
    ));
  }

  #[test]
  fn test_session_token_parsing() {
    let valid = "ab".repeat(32);
    assert!(SessionToken::from_string(valid).is_ok());

    assert!(SessionToken::from_string("abc").is_err());
    assert!(SessionToken::from_string("zz".repeat(32)).is_err());
  }

  #[test]
  fn test_session_token_from_bytes_round_trips_through_parser() {
    let token = SessionToken::from_bytes([7u8; SessionToken::BYTE_LENGTH]);
    assert_eq!(token.as_str().len(), 64);

    let parsed = SessionToken::from_string(token.as_str()).unwrap();
    assert_eq!(parsed.hash(), token.hash());
  }

  #[test]
  fn test_token_hash_differs_per_token() {
    let a = SessionToken::from_bytes([1u8; SessionToken::BYTE_LENGTH]);
    let b = SessionToken::from_bytes([2u8; SessionToken::BYTE_LENGTH]);

    assert_ne!(a.hash(), b.hash());
    assert_eq!(a.hash().as_str().len(), 64);
  }
}
