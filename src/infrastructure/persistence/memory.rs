//! In-memory port implementations backing unit and handler tests.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

use crate::domain::auth::{
  entities::{LoginAttempt, Session, User},
  errors::{AuthError, RepositoryError},
  ports::{LoginAttemptRepository, SessionRepository, UserRepository},
  value_objects::Email,
};

#[derive(Default)]
pub struct InMemoryUserRepository {
  users: Mutex<Vec<User>>,
  unavailable: AtomicBool,
}

impl InMemoryUserRepository {
  pub fn len(&self) -> usize {
    self.users.lock().unwrap().len()
  }

  /// Makes every call fail as if the database were unreachable
  pub fn set_unavailable(&self, unavailable: bool) {
    self.unavailable.store(unavailable, Ordering::SeqCst);
  }

  fn check_available(&self) -> Result<(), AuthError> {
    if self.unavailable.load(Ordering::SeqCst) {
      return Err(AuthError::Repository(RepositoryError::ConnectionFailed(
        "database is unreachable".to_string(),
      )));
    }
    Ok(())
  }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
  async fn create(&self, user: User) -> Result<User, AuthError> {
    self.check_available()?;
    let mut users = self.users.lock().unwrap();
    if users.iter().any(|u| u.email == user.email) {
      return Err(AuthError::Repository(RepositoryError::DuplicateKey(
        "users_email_key".to_string(),
      )));
    }
    users.push(user.clone());
    Ok(user)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
    self.check_available()?;
    Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
    self.check_available()?;
    Ok(
      self
        .users
        .lock()
        .unwrap()
        .iter()
        .find(|u| u.email == email.as_str())
        .cloned(),
    )
  }

  async fn count(&self) -> Result<i64, AuthError> {
    self.check_available()?;
    Ok(self.users.lock().unwrap().len() as i64)
  }

  async fn list(&self, limit: i64) -> Result<Vec<User>, AuthError> {
    self.check_available()?;
    let mut users = self.users.lock().unwrap().clone();
    users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    users.truncate(usize::try_from(limit).unwrap_or(0));
    Ok(users)
  }
}

#[derive(Default)]
pub struct InMemorySessionRepository {
  sessions: Mutex<Vec<Session>>,
}

impl InMemorySessionRepository {
  pub fn len(&self) -> usize {
    self.sessions.lock().unwrap().len()
  }

  pub fn insert(&self, session: Session) {
    self.sessions.lock().unwrap().push(session);
  }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
  async fn create(&self, session: Session) -> Result<Session, AuthError> {
    self.insert(session.clone());
    Ok(session)
  }

  async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AuthError> {
    Ok(
      self
        .sessions
        .lock()
        .unwrap()
        .iter()
        .find(|s| s.token_hash == token_hash)
        .cloned(),
    )
  }

  async fn delete(&self, session_id: Uuid) -> Result<(), AuthError> {
    let mut sessions = self.sessions.lock().unwrap();
    let before = sessions.len();
    sessions.retain(|s| s.id != session_id);
    if sessions.len() == before {
      return Err(AuthError::Repository(RepositoryError::NotFound));
    }
    Ok(())
  }

  async fn delete_expired(&self) -> Result<u64, AuthError> {
    let mut sessions = self.sessions.lock().unwrap();
    let before = sessions.len();
    let now = Utc::now();
    sessions.retain(|s| s.expires_at > now);
    Ok((before - sessions.len()) as u64)
  }
}

#[derive(Default)]
pub struct InMemoryLoginAttemptRepository {
  attempts: Mutex<Vec<LoginAttempt>>,
}

impl InMemoryLoginAttemptRepository {
  pub fn failures(&self) -> usize {
    self
      .attempts
      .lock()
      .unwrap()
      .iter()
      .filter(|a| !a.success)
      .count()
  }

  pub fn insert(&self, attempt: LoginAttempt) {
    self.attempts.lock().unwrap().push(attempt);
  }
}

#[async_trait]
impl LoginAttemptRepository for InMemoryLoginAttemptRepository {
  async fn create(&self, attempt: LoginAttempt) -> Result<LoginAttempt, AuthError> {
    self.attempts.lock().unwrap().push(attempt.clone());
    Ok(attempt)
  }

  async fn count_recent_failures(
    &self,
    email: &Email,
    window_seconds: i64,
  ) -> Result<i64, AuthError> {
    let window = Duration::seconds(window_seconds);
    let count = self
      .attempts
      .lock()
      .unwrap()
      .iter()
      .filter(|a| !a.success && a.email == email.as_str() && a.is_within(window))
      .count();
    Ok(count as i64)
  }

  async fn delete_older_than(&self, window_seconds: i64) -> Result<u64, AuthError> {
    let window = Duration::seconds(window_seconds);
    let mut attempts = self.attempts.lock().unwrap();
    let before = attempts.len();
    attempts.retain(|a| a.is_within(window));
    Ok((before - attempts.len()) as u64)
  }
}
