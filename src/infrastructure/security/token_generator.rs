use async_trait::async_trait;
use rand::RngCore;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::TokenGenerator;
use crate::domain::auth::value_objects::SessionToken;

/// Session token generator backed by the operating system CSPRNG
#[derive(Debug, Default)]
pub struct SecureTokenGenerator;

impl SecureTokenGenerator {
  pub fn new() -> Self {
    Self
  }
}

#[async_trait]
impl TokenGenerator for SecureTokenGenerator {
  /// 32 random bytes, hex encoded
  async fn generate(&self) -> Result<SessionToken, AuthError> {
    let mut bytes = [0u8; SessionToken::BYTE_LENGTH];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    Ok(SessionToken::from_bytes(bytes))
  }
}
