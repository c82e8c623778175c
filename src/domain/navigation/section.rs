use serde::Serialize;
use std::fmt;

/// Root of every dashboard route
pub const DASHBOARD_ROOT: &str = "/dashboard";

/// A dashboard section reachable from the sidebar.
///
/// Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavSection {
  Dashboard,
  Users,
  QuestionBank,
  QuizHistory,
  Courses,
  Lecturers,
  Students,
  Settings,
}

impl NavSection {
  pub const ALL: [NavSection; 8] = [
    NavSection::Dashboard,
    NavSection::Users,
    NavSection::QuestionBank,
    NavSection::QuizHistory,
    NavSection::Courses,
    NavSection::Lecturers,
    NavSection::Students,
    NavSection::Settings,
  ];

  pub fn label(self) -> &'static str {
    match self {
      NavSection::Dashboard => "Dashboard",
      NavSection::Users => "Kelola Pengguna",
      NavSection::QuestionBank => "Bank Soal",
      NavSection::QuizHistory => "Histori Quiz",
      NavSection::Courses => "Matakuliah",
      NavSection::Lecturers => "Dosen",
      NavSection::Students => "Mahasiswa",
      NavSection::Settings => "Pengaturan",
    }
  }

  /// Font Awesome classes
  pub fn icon(self) -> &'static str {
    match self {
      NavSection::Dashboard => "fas fa-tachometer-alt",
      NavSection::Users => "fas fa-users",
      NavSection::QuestionBank => "fas fa-book",
      NavSection::QuizHistory => "fas fa-history",
      NavSection::Courses => "fas fa-school",
      NavSection::Lecturers => "fas fa-chalkboard-teacher",
      NavSection::Students => "fas fa-user-graduate",
      NavSection::Settings => "fas fa-cog",
    }
  }

  /// Path segment under `/dashboard`; `None` for the dashboard itself
  pub fn slug(self) -> Option<&'static str> {
    match self {
      NavSection::Dashboard => None,
      NavSection::Users => Some("users"),
      NavSection::QuestionBank => Some("questions"),
      NavSection::QuizHistory => Some("quiz-history"),
      NavSection::Courses => Some("courses"),
      NavSection::Lecturers => Some("lecturers"),
      NavSection::Students => Some("students"),
      NavSection::Settings => Some("settings"),
    }
  }

  pub fn path(self) -> String {
    match self.slug() {
      Some(slug) => format!("{}/{}", DASHBOARD_ROOT, slug),
      None => DASHBOARD_ROOT.to_string(),
    }
  }

  pub fn from_slug(slug: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|s| s.slug() == Some(slug))
  }

  /// Resolves a request path to the section that owns it.
  ///
  /// The owner is the section whose path is the longest segment-aligned
  /// prefix: `/dashboard/users/42` belongs to `Users`, `/dashboard/unknown`
  /// falls back to `Dashboard`, and `/dashboardx` belongs to nothing. Query
  /// strings and trailing slashes are ignored.
  pub fn from_path(path: &str) -> Option<Self> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let rest = path.strip_prefix(DASHBOARD_ROOT)?;

    if !rest.is_empty() && !rest.starts_with('/') {
      return None;
    }

    let slug = rest.trim_start_matches('/').split('/').next().unwrap_or_default();
    Self::from_slug(slug).or(Some(NavSection::Dashboard))
  }
}

impl fmt::Display for NavSection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}
