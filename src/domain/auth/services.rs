use chrono::Duration;
use std::net::IpAddr;
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::entities::{LoginAttempt, Session, User};
use super::errors::{AuthError, RepositoryError};
use super::ports::{
  LoginAttemptRepository, PasswordHasher, SessionRepository, TokenGenerator, UserRepository,
};
use super::value_objects::{Email, Password, PasswordHash, SessionToken};

/// Tunables for session lifetime and brute-force throttling
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
  pub session_ttl_seconds: i64,
  pub remember_me_ttl_seconds: i64,
  pub rate_limit_window_seconds: i64,
  pub max_failed_attempts: i64,
}

impl Default for AuthServiceConfig {
  fn default() -> Self {
    Self {
      session_ttl_seconds: 60 * 60 * 8,
      remember_me_ttl_seconds: 60 * 60 * 24 * 30,
      rate_limit_window_seconds: 60 * 15,
      max_failed_attempts: 5,
    }
  }
}

/// Authentication service: the collaborator the login form talks to
pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  session_repo: Arc<dyn SessionRepository>,
  attempt_repo: Arc<dyn LoginAttemptRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
  token_generator: Arc<dyn TokenGenerator>,
  config: AuthServiceConfig,
  // Verified against when the email is unknown so both paths pay the Argon2 cost
  dummy_hash: OnceCell<PasswordHash>,
}

impl AuthService {
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    attempt_repo: Arc<dyn LoginAttemptRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_generator: Arc<dyn TokenGenerator>,
    config: AuthServiceConfig,
  ) -> Self {
    Self {
      user_repo,
      session_repo,
      attempt_repo,
      password_hasher,
      token_generator,
      config,
      dummy_hash: OnceCell::new(),
    }
  }

  /// Creates an account. Used to bootstrap the administrator.
  ///
  /// # Errors
  /// Returns `AuthError::EmailAlreadyExists` if email is already registered
  pub async fn register(
    &self,
    email: Email,
    password: Password,
    full_name: String,
  ) -> Result<User, AuthError> {
    if self.user_repo.find_by_email(&email).await?.is_some() {
      return Err(AuthError::EmailAlreadyExists);
    }

    let password_hash = self.password_hasher.hash(&password).await?;
    let user = User::new(email.into_inner(), password_hash.into_inner(), full_name);

    match self.user_repo.create(user).await {
      Ok(user) => Ok(user),
      Err(AuthError::Repository(RepositoryError::DuplicateKey(_))) => {
        Err(AuthError::EmailAlreadyExists)
      }
      Err(e) => Err(e),
    }
  }

  /// Verifies credentials and opens a new session
  ///
  /// Every checked attempt is recorded; once an email collects
  /// `max_failed_attempts` failures inside the window, further attempts are
  /// refused without checking the password and are not recorded, so the
  /// lock lifts when the window moves past the last real failure.
  ///
  /// # Returns
  /// A tuple containing (User, Session, SessionToken) on success
  ///
  /// # Errors
  /// `InvalidCredentials` for an unknown email or wrong password,
  /// `RateLimitExceeded` when throttled, repository errors otherwise
  pub async fn login(
    &self,
    email: Email,
    password: Password,
    ip_address: Option<IpAddr>,
    user_agent: Option<String>,
    remember_me: bool,
  ) -> Result<(User, Session, SessionToken), AuthError> {
    let failed_attempts = self
      .attempt_repo
      .count_recent_failures(&email, self.config.rate_limit_window_seconds)
      .await?;

    if failed_attempts >= self.config.max_failed_attempts {
      tracing::warn!(email = %email, failed_attempts, "Login throttled");
      return Err(AuthError::RateLimitExceeded);
    }

    let Some(user) = self.user_repo.find_by_email(&email).await? else {
      let dummy = self.dummy_hash().await?;
      let _ = self.password_hasher.verify(&password, dummy).await?;
      tracing::info!(email = %email, "Login failed: unknown email");
      self.record_attempt(&email, ip_address, false).await?;
      return Err(AuthError::InvalidCredentials);
    };

    let stored_hash = PasswordHash::from_hash(&user.password_hash)?;
    if !self.password_hasher.verify(&password, &stored_hash).await? {
      tracing::info!(user_id = %user.id, "Login failed: wrong password");
      self.record_attempt(&email, ip_address, false).await?;
      return Err(AuthError::InvalidCredentials);
    }

    self.record_attempt(&email, ip_address, true).await?;

    let session_token = self.token_generator.generate().await?;
    let ttl = if remember_me {
      self.config.remember_me_ttl_seconds
    } else {
      self.config.session_ttl_seconds
    };

    let session = Session::with_duration(
      user.id,
      session_token.hash().into_inner(),
      Duration::seconds(ttl),
      ip_address,
      user_agent,
    );
    let created_session = self.session_repo.create(session).await?;

    tracing::info!(user_id = %user.id, session_id = %created_session.id, "Session opened");

    Ok((user, created_session, session_token))
  }

  /// Revokes the session behind `token`
  ///
  /// # Errors
  /// Returns `AuthError::InvalidSession` if no such session exists
  pub async fn logout(&self, token: SessionToken) -> Result<(), AuthError> {
    let session = self
      .session_repo
      .find_by_token_hash(token.hash().as_str())
      .await?
      .ok_or(AuthError::InvalidSession)?;

    self.session_repo.delete(session.id).await?;
    tracing::info!(user_id = %session.user_id, session_id = %session.id, "Session closed");

    Ok(())
  }

  /// Resolves a session token to its user
  ///
  /// Expired sessions are deleted on sight.
  pub async fn validate_session(&self, token: SessionToken) -> Result<User, AuthError> {
    let session = self
      .session_repo
      .find_by_token_hash(token.hash().as_str())
      .await?
      .ok_or(AuthError::InvalidSession)?;

    if session.is_expired() {
      self.session_repo.delete(session.id).await?;
      return Err(AuthError::InvalidSession);
    }

    self
      .user_repo
      .find_by_id(session.user_id)
      .await?
      .ok_or(AuthError::UserNotFound)
  }

  /// Removes all expired sessions
  pub async fn purge_expired_sessions(&self) -> Result<u64, AuthError> {
    self.session_repo.delete_expired().await
  }

  /// Deletes login attempts older than the throttling window, returning how many were removed
  pub async fn purge_stale_login_attempts(&self) -> Result<u64, AuthError> {
    self
      .attempt_repo
      .delete_older_than(self.config.rate_limit_window_seconds)
      .await
  }

  async fn dummy_hash(&self) -> Result<&PasswordHash, AuthError> {
    let password = Password::new("quizku-unknown-account")?;
    self
      .dummy_hash
      .get_or_try_init(|| self.password_hasher.hash(&password))
      .await
  }

  async fn record_attempt(
    &self,
    email: &Email,
    ip_address: Option<IpAddr>,
    success: bool,
  ) -> Result<(), AuthError> {
    let attempt = LoginAttempt::new(email.as_str().to_string(), ip_address, success);
    self.attempt_repo.create(attempt).await?;
    Ok(())
  }
}
