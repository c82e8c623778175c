//! Authentication use cases
//!
//! Orchestrate the domain `AuthService` for the web pages and the JSON API.

mod ensure_admin_account;
mod get_current_user;
mod login_user;
mod logout_user;

pub use ensure_admin_account::{
  EnsureAdminAccountCommand, EnsureAdminAccountOutcome, EnsureAdminAccountUseCase,
};
pub use get_current_user::{GetCurrentUserResponse, GetCurrentUserUseCase};
pub use login_user::{LoginUserCommand, LoginUserResponse, LoginUserUseCase};
pub use logout_user::LogoutUserUseCase;
