use serde::Serialize;

use super::section::NavSection;
use crate::domain::auth::entities::User;

/// Avatar used when the user has not uploaded one
pub const DEFAULT_AVATAR_URL: &str = "/static/img/avatar-placeholder.svg";

/// Identity block rendered in the sidebar footer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserIdentity {
  pub name: String,
  pub email: String,
  pub avatar_url: String,
}

impl From<&User> for UserIdentity {
  fn from(user: &User) -> Self {
    Self {
      name: user.full_name.clone(),
      email: user.email.clone(),
      avatar_url: user
        .avatar_url
        .clone()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_AVATAR_URL.to_string()),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
  pub section: NavSection,
  pub label: &'static str,
  pub icon: &'static str,
  pub href: String,
  pub active: bool,
}

/// View model for the sidebar partial
#[derive(Debug, Clone, Serialize)]
pub struct SidebarView {
  pub brand: &'static str,
  pub entries: Vec<NavEntry>,
  pub user: UserIdentity,
  pub logout_action: &'static str,
}

impl SidebarView {
  /// Builds the sidebar for `user`, marking the entry that owns `current_path`
  pub fn build(user: UserIdentity, current_path: &str) -> Self {
    let active = NavSection::from_path(current_path);

    let entries = NavSection::ALL
      .into_iter()
      .map(|section| NavEntry {
        section,
        label: section.label(),
        icon: section.icon(),
        href: section.path(),
        active: Some(section) == active,
      })
      .collect();

    Self {
      brand: "Quizku",
      entries,
      user,
      logout_action: "/auth/logout",
    }
  }

  pub fn active_section(&self) -> Option<NavSection> {
    self.entries.iter().find(|e| e.active).map(|e| e.section)
  }
}
