use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::net::IpAddr;
use uuid::Uuid;

use crate::domain::auth::entities::Session;
use crate::domain::auth::errors::{AuthError, RepositoryError};
use crate::domain::auth::ports::SessionRepository;

/// Database row structure for sessions table
#[derive(Debug, FromRow)]
struct SessionRow {
  id: Uuid,
  user_id: Uuid,
  token_hash: String,
  ip_address: Option<String>,
  user_agent: Option<String>,
  expires_at: DateTime<Utc>,
  created_at: DateTime<Utc>,
}

impl From<SessionRow> for Session {
  fn from(row: SessionRow) -> Self {
    let ip_address = row
      .ip_address
      .and_then(|ip_str| ip_str.parse::<IpAddr>().ok());

    Session::from_db(
      row.id,
      row.user_id,
      row.token_hash,
      ip_address,
      row.user_agent,
      row.expires_at,
      row.created_at,
    )
  }
}

/// PostgreSQL implementation of the SessionRepository trait
pub struct PostgresSessionRepository {
  pool: PgPool,
}

impl PostgresSessionRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
  async fn create(&self, session: Session) -> Result<Session, AuthError> {
    let ip_address = session.ip_address.map(|ip| ip.to_string());

    let row = sqlx::query_as::<_, SessionRow>(
      r#"
            INSERT INTO sessions (id, user_id, token_hash, ip_address, user_agent, expires_at, created_at)
            VALUES ($1, $2, $3, CAST($4 AS INET), $5, $6, $7)
            RETURNING id, user_id, token_hash, HOST(ip_address) as ip_address, user_agent, expires_at, created_at
            "#,
    )
    .bind(session.id)
    .bind(session.user_id)
    .bind(&session.token_hash)
    .bind(ip_address.as_deref())
    .bind(session.user_agent.as_deref())
    .bind(session.expires_at)
    .bind(session.created_at)
    .fetch_one(&self.pool)
    .await
    .inspect_err(|e| tracing::error!("Failed to create session: {}", e))?;

    Ok(row.into())
  }

  async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AuthError> {
    let row = sqlx::query_as::<_, SessionRow>(
      r#"
            SELECT id, user_id, token_hash, HOST(ip_address) as ip_address, user_agent, expires_at, created_at
            FROM sessions
            WHERE token_hash = $1
            "#,
    )
    .bind(token_hash)
    .fetch_optional(&self.pool)
    .await
    .inspect_err(|e| tracing::error!("Failed to find session by token hash: {}", e))?;

    Ok(row.map(Into::into))
  }

  async fn delete(&self, session_id: Uuid) -> Result<(), AuthError> {
    let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
      .bind(session_id)
      .execute(&self.pool)
      .await
      .inspect_err(|e| tracing::error!("Failed to delete session: {}", e))?;

    if result.rows_affected() == 0 {
      tracing::warn!("Session {} not found for deletion", session_id);
      return Err(AuthError::Repository(RepositoryError::NotFound));
    }

    Ok(())
  }

  async fn delete_expired(&self) -> Result<u64, AuthError> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
      .execute(&self.pool)
      .await
      .inspect_err(|e| tracing::error!("Failed to purge expired sessions: {}", e))?;

    Ok(result.rows_affected())
  }
}
