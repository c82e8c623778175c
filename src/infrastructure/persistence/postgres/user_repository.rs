use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::{
  entities::User, errors::AuthError, ports::UserRepository, value_objects::Email,
};

/// PostgreSQL implementation of the UserRepository trait
pub struct PostgresUserRepository {
  pool: PgPool,
}

impl PostgresUserRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Database row structure for users table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
  id: Uuid,
  email: String,
  password_hash: String,
  full_name: String,
  avatar_url: Option<String>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
  fn from(row: UserRow) -> Self {
    User::from_db(
      row.id,
      row.email,
      row.password_hash,
      row.full_name,
      row.avatar_url,
      row.created_at,
      row.updated_at,
    )
  }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
  async fn create(&self, user: User) -> Result<User, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            INSERT INTO users (id, email, password_hash, full_name, avatar_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, email, password_hash, full_name, avatar_url, created_at, updated_at
            "#,
    )
    .bind(user.id)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.full_name)
    .bind(&user.avatar_url)
    .bind(user.created_at)
    .bind(user.updated_at)
    .fetch_one(&self.pool)
    .await
    .inspect_err(|e| tracing::error!("Failed to create user: {}", e))?;

    Ok(row.into())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, email, password_hash, full_name, avatar_url, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
    )
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(Into::into))
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
    let row = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, email, password_hash, full_name, avatar_url, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
    )
    .bind(email.as_str())
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(Into::into))
  }

  async fn count(&self) -> Result<i64, AuthError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
      .fetch_one(&self.pool)
      .await?;

    Ok(count)
  }

  async fn list(&self, limit: i64) -> Result<Vec<User>, AuthError> {
    let rows = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, email, password_hash, full_name, avatar_url, created_at, updated_at
            FROM users
            ORDER BY created_at DESC
            LIMIT $1
            "#,
    )
    .bind(limit)
    .fetch_all(&self.pool)
    .await
    .inspect_err(|e| tracing::error!("Failed to list users: {}", e))?;

    Ok(rows.into_iter().map(Into::into).collect())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::errors::RepositoryError;
  use crate::infrastructure::persistence::postgres::test_db::setup_test_db;

  #[tokio::test]
  #[ignore = "requires a Docker daemon"]
  async fn test_create_and_find_user() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);

    let user = User::new(
      "jacob@gmail.com".to_string(),
      "hashed_password".to_string(),
      "Jacob Jones".to_string(),
    )
    .with_avatar("/static/img/jacob.png");

    let created = repo.create(user.clone()).await.unwrap();
    assert_eq!(created.id, user.id);
    assert_eq!(created.avatar_url.as_deref(), Some("/static/img/jacob.png"));

    let email = Email::new("jacob@gmail.com").unwrap();
    let by_email = repo.find_by_email(&email).await.unwrap().unwrap();
    assert_eq!(by_email.id, user.id);

    let by_id = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(by_id.full_name, "Jacob Jones");

    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
  }

  #[tokio::test]
  #[ignore = "requires a Docker daemon"]
  async fn test_count_and_list_newest_first() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);

    let older = User::from_db(
      Uuid::new_v4(),
      "older@quizku.id".into(),
      "h".into(),
      "Older".into(),
      None,
      Utc::now() - chrono::Duration::days(1),
      Utc::now(),
    );
    repo.create(older).await.unwrap();
    repo
      .create(User::new("newer@quizku.id".into(), "h".into(), "Newer".into()))
      .await
      .unwrap();

    assert_eq!(repo.count().await.unwrap(), 2);
    let listed = repo.list(10).await.unwrap();
    assert_eq!(listed[0].full_name, "Newer");
    assert_eq!(listed[1].full_name, "Older");
    assert_eq!(repo.list(1).await.unwrap().len(), 1);
  }

  #[tokio::test]
  #[ignore = "requires a Docker daemon"]
  async fn test_duplicate_email() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);

    let first = User::new("dup@quizku.id".into(), "h1".into(), "One".into());
    let second = User::new("dup@quizku.id".into(), "h2".into(), "Two".into());

    repo.create(first).await.unwrap();
    let result = repo.create(second).await;

    assert!(matches!(
      result,
      Err(AuthError::Repository(RepositoryError::DuplicateKey(_)))
    ));
  }
}
