use argon2::password_hash::SaltString;
use argon2::{
  Algorithm, Argon2, Params, Version,
  password_hash::{
    PasswordHash as Argon2PasswordHash, PasswordHasher as Argon2PasswordHasherTrait,
    PasswordVerifier,
  },
};
use async_trait::async_trait;

use crate::domain::auth::errors::{AuthError, HashError};
use crate::domain::auth::ports::PasswordHasher;
use crate::domain::auth::value_objects::{Password, PasswordHash};

/// Argon2id password hasher implementation
///
/// Defaults follow the OWASP baseline:
/// - Memory cost: 19 MiB (19456 KiB)
/// - Time cost: 2 iterations
/// - Parallelism: 1 thread
pub struct Argon2PasswordHasher {
  argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
  pub const DEFAULT_MEMORY_KIB: u32 = 19456;
  pub const DEFAULT_ITERATIONS: u32 = 2;
  pub const DEFAULT_PARALLELISM: u32 = 1;

  /// Creates a hasher with the default cost parameters
  pub fn new() -> Result<Self, AuthError> {
    Self::with_params(
      Self::DEFAULT_MEMORY_KIB,
      Self::DEFAULT_ITERATIONS,
      Self::DEFAULT_PARALLELISM,
    )
  }

  /// Creates a hasher with explicit cost parameters
  pub fn with_params(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, AuthError> {
    let params = Params::new(memory_kib, iterations, parallelism, Some(32)).map_err(|e| {
      AuthError::Hash(HashError::HashingFailed(format!(
        "Failed to create Argon2 params: {}",
        e
      )))
    })?;

    Ok(Self {
      argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
    })
  }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError> {
    let salt = SaltString::generate(&mut rand::rngs::OsRng);

    let hash = self
      .argon2
      .hash_password(password.as_str().as_bytes(), &salt)
      .map_err(|e| AuthError::Hash(HashError::HashingFailed(e.to_string())))?;

    Ok(PasswordHash::from_hash(hash.to_string())?)
  }

  /// Verifies a password; argon2 compares in constant time
  async fn verify(
    &self,
    password: &Password,
    hashed_password: &PasswordHash,
  ) -> Result<bool, AuthError> {
    let parsed_hash = Argon2PasswordHash::new(hashed_password.as_str())
      .map_err(|e| AuthError::Hash(HashError::VerificationFailed(e.to_string())))?;

    match self
      .argon2
      .verify_password(password.as_str().as_bytes(), &parsed_hash)
    {
      Ok(()) => Ok(true),
      Err(argon2::password_hash::Error::Password) => Ok(false),
      Err(e) => Err(AuthError::Hash(HashError::VerificationFailed(e.to_string()))),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  // Minimal cost keeps the suite fast in debug builds
  fn hasher() -> Argon2PasswordHasher {
    Argon2PasswordHasher::with_params(8, 1, 1).unwrap()
  }

  #[tokio::test]
  async fn test_hash_is_argon2id() {
    let password = Password::new("test_password_123").unwrap();

    let hash = hasher().hash(&password).await.unwrap();

    assert!(hash.as_str().starts_with("$argon2id$"));
    let parsed = Argon2PasswordHash::new(hash.as_str()).unwrap();
    assert_eq!(parsed.version, Some(Version::V0x13 as u32));
  }

  #[tokio::test]
  async fn test_verify_correct_and_incorrect_password() {
    let hasher = hasher();
    let password = Password::new("test_password_123").unwrap();
    let wrong_password = Password::new("wrong_password").unwrap();

    let hash = hasher.hash(&password).await.unwrap();

    assert!(hasher.verify(&password, &hash).await.unwrap());
    assert!(!hasher.verify(&wrong_password, &hash).await.unwrap());
  }

  #[tokio::test]
  async fn test_hash_produces_different_salts() {
    let hasher = hasher();
    let password = Password::new("test_password_123").unwrap();

    let hash1 = hasher.hash(&password).await.unwrap();
    let hash2 = hasher.hash(&password).await.unwrap();

    assert_ne!(hash1.as_str(), hash2.as_str());
    assert!(hasher.verify(&password, &hash1).await.unwrap());
    assert!(hasher.verify(&password, &hash2).await.unwrap());
  }

  #[test]
  fn test_invalid_params_are_rejected() {
    assert!(Argon2PasswordHasher::with_params(0, 0, 0).is_err());
  }
}
