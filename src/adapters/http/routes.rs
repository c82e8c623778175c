use actix_web::{HttpResponse, http::header, web};
use std::sync::Arc;

use crate::application::auth::{GetCurrentUserUseCase, LoginUserUseCase, LogoutUserUseCase};
use crate::application::users::{GetDashboardSummaryUseCase, ListUsersUseCase};
use crate::domain::auth::ports::UserRepository;
use crate::domain::auth::services::AuthService;

use super::handlers::auth::{get_current_user_handler, login_handler, logout_handler};
use super::handlers::web_auth::SessionCookieSettings;
use super::handlers::{pages, web_auth};
use super::middleware::{AuthMiddleware, WebAuthMiddleware};
use super::templates::TemplateEngine;

/// Everything the HTTP layer needs, built once at startup and cloned per worker
#[derive(Clone)]
pub struct AppDependencies {
  pub templates: TemplateEngine,
  pub auth_service: Arc<AuthService>,
  pub login_use_case: Arc<LoginUserUseCase>,
  pub logout_use_case: Arc<LogoutUserUseCase>,
  pub get_user_use_case: Arc<GetCurrentUserUseCase>,
  pub dashboard_summary_use_case: Arc<GetDashboardSummaryUseCase>,
  pub list_users_use_case: Arc<ListUsersUseCase>,
  pub cookie_settings: SessionCookieSettings,
}

impl AppDependencies {
  pub fn new(
    templates: TemplateEngine,
    auth_service: Arc<AuthService>,
    user_repo: Arc<dyn UserRepository>,
    cookie_settings: SessionCookieSettings,
  ) -> Self {
    Self {
      templates,
      dashboard_summary_use_case: Arc::new(GetDashboardSummaryUseCase::new(user_repo.clone())),
      list_users_use_case: Arc::new(ListUsersUseCase::new(user_repo)),
      login_use_case: Arc::new(LoginUserUseCase::new(auth_service.clone())),
      logout_use_case: Arc::new(LogoutUserUseCase::new(auth_service.clone())),
      get_user_use_case: Arc::new(GetCurrentUserUseCase::new(auth_service.clone())),
      auth_service,
      cookie_settings,
    }
  }

  #[cfg(test)]
  pub(crate) fn for_tests(fixture: &crate::test_support::Fixture) -> Self {
    Self::new(
      super::templates::test_engine(),
      fixture.auth_service.clone(),
      fixture.users.clone(),
      SessionCookieSettings { secure: false },
    )
  }
}

/// Configure the JSON authentication API
///
/// # Routes
///
/// - POST /api/v1/auth/login - Authenticate and create a session
/// - POST /api/v1/auth/logout - Invalidate the current session (bearer)
/// - GET /api/v1/auth/me - Get current user information (bearer)
pub fn configure_auth_api_routes(cfg: &mut web::ServiceConfig, deps: AppDependencies) {
  cfg.service(
    web::scope("/api/v1/auth")
      .app_data(web::Data::new(deps.login_use_case))
      .app_data(web::Data::new(deps.logout_use_case))
      .route("/login", web::post().to(login_handler))
      .service(
        web::scope("")
          .wrap(AuthMiddleware::new(deps.get_user_use_case))
          .route("/logout", web::post().to(logout_handler))
          .route("/me", web::get().to(get_current_user_handler)),
      ),
  );
}

/// Configure the server-rendered pages and the login/logout form endpoints
pub fn configure_web_routes(cfg: &mut web::ServiceConfig, deps: AppDependencies) {
  cfg
    .app_data(web::Data::new(deps.templates.clone()))
    .app_data(web::Data::new(deps.auth_service.clone()))
    .app_data(web::Data::new(deps.cookie_settings));

  // Public routes (no authentication required)
  cfg
    .route(
      "/",
      web::get().to(|| async {
        HttpResponse::Found()
          .insert_header((header::LOCATION, "/login"))
          .finish()
      }),
    )
    .route("/login", web::get().to(pages::login_page));

  // Auth form submission routes
  cfg.service(
    web::scope("/auth")
      .app_data(web::Data::new(deps.login_use_case))
      .app_data(web::Data::new(deps.logout_use_case))
      .route("/login", web::post().to(web_auth::login_submit))
      .route("/logout", web::post().to(web_auth::logout)),
  );

  // Protected routes (require authentication)
  cfg.service(
    web::scope("/dashboard")
      .wrap(WebAuthMiddleware::new(deps.auth_service))
      .app_data(web::Data::new(deps.dashboard_summary_use_case))
      .app_data(web::Data::new(deps.list_users_use_case))
      .route("", web::get().to(pages::dashboard_page))
      .route("/", web::get().to(pages::dashboard_page))
      .route("/users", web::get().to(pages::users_page))
      .route("/{section}", web::get().to(pages::section_page)),
  );
}
