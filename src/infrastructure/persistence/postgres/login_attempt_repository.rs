use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::net::IpAddr;
use uuid::Uuid;

use crate::domain::auth::{
  entities::LoginAttempt, errors::AuthError, ports::LoginAttemptRepository, value_objects::Email,
};

/// Database row structure for login_attempts table
#[derive(Debug, FromRow)]
struct LoginAttemptRow {
  id: Uuid,
  email: String,
  ip_address: Option<String>,
  success: bool,
  attempted_at: DateTime<Utc>,
}

/// PostgreSQL implementation of the LoginAttemptRepository trait
pub struct PostgresLoginAttemptRepository {
  pool: PgPool,
}

impl PostgresLoginAttemptRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl LoginAttemptRepository for PostgresLoginAttemptRepository {
  async fn create(&self, attempt: LoginAttempt) -> Result<LoginAttempt, AuthError> {
    let ip_string = attempt.ip_address.map(|ip| ip.to_string());

    let row = sqlx::query_as::<_, LoginAttemptRow>(
      r#"
            INSERT INTO login_attempts (id, email, ip_address, success, attempted_at)
            VALUES ($1, $2, CAST($3 AS INET), $4, $5)
            RETURNING id, email, HOST(ip_address) as ip_address, success, attempted_at
            "#,
    )
    .bind(attempt.id)
    .bind(&attempt.email)
    .bind(ip_string.as_deref())
    .bind(attempt.success)
    .bind(attempt.attempted_at)
    .fetch_one(&self.pool)
    .await
    .inspect_err(|e| tracing::error!("Failed to record login attempt: {}", e))?;

    Ok(LoginAttempt::from_db(
      row.id,
      row.email,
      row.ip_address.and_then(|ip| ip.parse::<IpAddr>().ok()),
      row.success,
      row.attempted_at,
    ))
  }

  async fn count_recent_failures(
    &self,
    email: &Email,
    window_seconds: i64,
  ) -> Result<i64, AuthError> {
    let count: i64 = sqlx::query_scalar(
      r#"
            SELECT COUNT(*)
            FROM login_attempts
            WHERE email = $1
              AND success = false
              AND attempted_at >= NOW() - INTERVAL '1 second' * $2
            "#,
    )
    .bind(email.as_str())
    .bind(window_seconds as f64)
    .fetch_one(&self.pool)
    .await
    .inspect_err(|e| tracing::error!("Failed to count login failures for {}: {}", email, e))?;

    Ok(count)
  }

  async fn delete_older_than(&self, window_seconds: i64) -> Result<u64, AuthError> {
    let result = sqlx::query(
      r#"
            DELETE FROM login_attempts
            WHERE attempted_at < NOW() - INTERVAL '1 second' * $1
            "#,
    )
    .bind(window_seconds as f64)
    .execute(&self.pool)
    .await
    .inspect_err(|e| tracing::error!("Failed to prune login attempts: {}", e))?;

    Ok(result.rows_affected())
  }
}
