use std::sync::Arc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::UserRepository;

/// Figures shown on the dashboard overview
#[derive(Debug, Clone, serde::Serialize)]
pub struct DashboardSummary {
  pub total_users: i64,
}

pub struct GetDashboardSummaryUseCase {
  user_repo: Arc<dyn UserRepository>,
}

impl GetDashboardSummaryUseCase {
  pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
    Self { user_repo }
  }

  pub async fn execute(&self) -> Result<DashboardSummary, AuthError> {
    let total_users = self.user_repo.count().await?;

    Ok(DashboardSummary { total_users })
  }
}
