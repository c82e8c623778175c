use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::UserRepository;
use crate::domain::navigation::UserIdentity;

#[derive(Debug, Clone)]
pub struct ListUsersCommand {
  /// The signed-in administrator, left out of the listing
  pub viewer_id: Uuid,
  pub limit: i64,
}

/// One row of the user table
#[derive(Debug, Clone, serde::Serialize)]
pub struct UserListItem {
  pub user_id: Uuid,
  pub name: String,
  pub email: String,
  pub avatar_url: String,
  pub joined_on: String,
}

pub struct ListUsersUseCase {
  user_repo: Arc<dyn UserRepository>,
}

impl ListUsersUseCase {
  pub const DEFAULT_LIMIT: i64 = 100;

  pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
    Self { user_repo }
  }

  /// Lists accounts newest first, excluding the viewer
  pub async fn execute(&self, command: ListUsersCommand) -> Result<Vec<UserListItem>, AuthError> {
    let limit = command.limit.max(0);
    // One extra row so the viewer's own account does not shorten the page
    let users = self.user_repo.list(limit.saturating_add(1)).await?;

    Ok(
      users
        .iter()
        .filter(|user| user.id != command.viewer_id)
        .take(usize::try_from(limit).unwrap_or(usize::MAX))
        .map(|user| {
          let identity = UserIdentity::from(user);
          UserListItem {
            user_id: user.id,
            name: identity.name,
            email: identity.email,
            avatar_url: identity.avatar_url,
            joined_on: user.created_at.format("%d %b %Y").to_string(),
          }
        })
        .collect(),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::{Email, Password};
  use crate::test_support::{self, Fixture};

  async fn register(fixture: &Fixture, email: &str, name: &str) {
    fixture
      .auth_service
      .register(
        Email::new(email).unwrap(),
        Password::new("member-password").unwrap(),
        name.to_string(),
      )
      .await
      .unwrap();
  }

  #[tokio::test]
  async fn test_listing_leaves_out_the_viewer() {
    let fixture = test_support::seeded_fixture().await;
    register(&fixture, "budi@quizku.id", "Budi").await;
    register(&fixture, "sari@quizku.id", "Sari").await;
    let use_case = ListUsersUseCase::new(fixture.users.clone());

    let items = use_case
      .execute(ListUsersCommand {
        viewer_id: fixture.admin.id,
        limit: ListUsersUseCase::DEFAULT_LIMIT,
      })
      .await
      .unwrap();

    let mut emails: Vec<_> = items.iter().map(|i| i.email.as_str()).collect();
    emails.sort();
    assert_eq!(emails, vec!["budi@quizku.id", "sari@quizku.id"]);
    assert!(items.iter().all(|i| !i.joined_on.is_empty()));
  }

  #[tokio::test]
  async fn test_listing_respects_the_limit() {
    let fixture = test_support::seeded_fixture().await;
    register(&fixture, "budi@quizku.id", "Budi").await;
    register(&fixture, "sari@quizku.id", "Sari").await;
    let use_case = ListUsersUseCase::new(fixture.users.clone());

    let items = use_case
      .execute(ListUsersCommand {
        viewer_id: fixture.admin.id,
        limit: 1,
      })
      .await
      .unwrap();

    assert_eq!(items.len(), 1);
  }
}
