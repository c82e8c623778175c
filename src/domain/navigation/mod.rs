//! Dashboard navigation: the sidebar sections and the view model that
//! the sidebar partial renders.

pub mod section;
pub mod sidebar;

pub use section::{DASHBOARD_ROOT, NavSection};
pub use sidebar::{DEFAULT_AVATAR_URL, NavEntry, SidebarView, UserIdentity};
