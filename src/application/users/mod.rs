//! Read-only user administration
//!
//! Backs the dashboard overview and the "Kelola Pengguna" page.

mod get_dashboard_summary;
mod list_users;

pub use get_dashboard_summary::{DashboardSummary, GetDashboardSummaryUseCase};
pub use list_users::{ListUsersCommand, ListUsersUseCase, UserListItem};
