use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use uuid::Uuid;

/// A dashboard account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub id: Uuid,
  /// Unique, lowercased
  pub email: String,
  /// Argon2id PHC string
  pub password_hash: String,
  /// Display name shown in the sidebar footer
  pub full_name: String,
  pub avatar_url: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl User {
  /// Creates a new user with the given details
  pub fn new(email: String, password_hash: String, full_name: String) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      email,
      password_hash,
      full_name,
      avatar_url: None,
      created_at: now,
      updated_at: now,
    }
  }

  /// Creates a user from database fields (for reconstruction)
  pub fn from_db(
    id: Uuid,
    email: String,
    password_hash: String,
    full_name: String,
    avatar_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      email,
      password_hash,
      full_name,
      avatar_url,
      created_at,
      updated_at,
    }
  }

  pub fn with_avatar(mut self, avatar_url: impl Into<String>) -> Self {
    self.avatar_url = Some(avatar_url.into());
    self
  }
}

/// Session entity representing an authenticated browser or API client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
  pub id: Uuid,
  pub user_id: Uuid,
  /// SHA-256 of the session token; the token itself is never stored
  pub token_hash: String,
  pub ip_address: Option<IpAddr>,
  pub user_agent: Option<String>,
  pub expires_at: DateTime<Utc>,
  pub created_at: DateTime<Utc>,
}

impl Session {
  /// Creates a session that expires `duration` from now
  pub fn with_duration(
    user_id: Uuid,
    token_hash: String,
    duration: Duration,
    ip_address: Option<IpAddr>,
    user_agent: Option<String>,
  ) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      user_id,
      token_hash,
      ip_address,
      user_agent,
      expires_at: now + duration,
      created_at: now,
    }
  }

  /// Creates a session from database fields (for reconstruction)
  pub fn from_db(
    id: Uuid,
    user_id: Uuid,
    token_hash: String,
    ip_address: Option<IpAddr>,
    user_agent: Option<String>,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      user_id,
      token_hash,
      ip_address,
      user_agent,
      expires_at,
      created_at,
    }
  }

  pub fn is_expired(&self) -> bool {
    self.expires_at <= Utc::now()
  }
}

/// Record of a single sign-in attempt, used for throttling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginAttempt {
  pub id: Uuid,
  pub email: String,
  pub ip_address: Option<IpAddr>,
  pub success: bool,
  pub attempted_at: DateTime<Utc>,
}

impl LoginAttempt {
  pub fn new(email: String, ip_address: Option<IpAddr>, success: bool) -> Self {
    Self {
      id: Uuid::new_v4(),
      email,
      ip_address,
      success,
      attempted_at: Utc::now(),
    }
  }

  pub fn success(email: String, ip_address: Option<IpAddr>) -> Self {
    Self::new(email, ip_address, true)
  }

  pub fn failure(email: String, ip_address: Option<IpAddr>) -> Self {
    Self::new(email, ip_address, false)
  }

  pub fn from_db(
    id: Uuid,
    email: String,
    ip_address: Option<IpAddr>,
    success: bool,
    attempted_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      email,
      ip_address,
      success,
      attempted_at,
    }
  }

  /// Checks if this attempt was made within the given duration from now
  pub fn is_within(&self, duration: Duration) -> bool {
    self.attempted_at >= Utc::now() - duration
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_user_creation() {
    let user = User::new(
      "jacob@gmail.com".to_string(),
      "hashed_password".to_string(),
      "Jacob Jones".to_string(),
    );

    assert_eq!(user.email, "jacob@gmail.com");
    assert_eq!(user.full_name, "Jacob Jones");
    assert!(user.avatar_url.is_none());
    assert_eq!(user.created_at, user.updated_at);
  }

  #[test]
  fn test_user_with_avatar() {
    let user = User::new("a@b.io".into(), "h".into(), "A".into()).with_avatar("/img/a.png");
    assert_eq!(user.avatar_url.as_deref(), Some("/img/a.png"));
  }

  #[test]
  fn test_session_expiration() {
    let user_id = Uuid::new_v4();
    let live = Session::with_duration(
      user_id,
      "hash".to_string(),
      Duration::hours(1),
      Some("127.0.0.1".parse().unwrap()),
      Some("Mozilla/5.0".to_string()),
    );
    assert!(!live.is_expired());
    assert_eq!(live.user_id, user_id);

    let dead = Session::with_duration(user_id, "hash".to_string(), Duration::seconds(-10), None, None);
    assert!(dead.is_expired());
  }

  #[test]
  fn test_login_attempt_flags() {
    let ip = Some("192.168.1.1".parse().unwrap());
    let ok = LoginAttempt::success("a@b.io".to_string(), ip);
    let failed = LoginAttempt::failure("a@b.io".to_string(), None);

    assert!(ok.success);
    assert!(!failed.success);
    assert!(failed.is_within(Duration::minutes(1)));
  }
}
