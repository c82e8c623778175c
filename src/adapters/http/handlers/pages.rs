use actix_web::{
  HttpRequest, HttpResponse,
  http::{StatusCode, header},
  web,
};
use std::sync::Arc;

use super::get_user;
use crate::adapters::http::middleware::SESSION_COOKIE;
use crate::adapters::http::templates::TemplateEngine;
use crate::application::users::{GetDashboardSummaryUseCase, ListUsersCommand, ListUsersUseCase};
use crate::domain::auth::{AuthError, AuthService, SessionToken};
use crate::domain::navigation::{NavSection, SidebarView, UserIdentity};

fn html(status: StatusCode, body: String) -> HttpResponse {
  HttpResponse::build(status)
    .content_type("text/html; charset=utf-8")
    .body(body)
}

/// Renders the login page, or only the form fragment for HTMX swaps
pub(crate) fn render_login(
  templates: &TemplateEngine,
  status: StatusCode,
  error: Option<&str>,
  email: &str,
  fragment: bool,
) -> Result<HttpResponse, actix_web::Error> {
  let mut context = tera::Context::new();
  context.insert("title", "Login");
  context.insert("error", &error);
  context.insert("email", email);

  let template = if fragment {
    "partials/login_form.html.tera"
  } else {
    "pages/login.html.tera"
  };

  let body = templates
    .render(template, &context)
    .map_err(actix_web::error::ErrorInternalServerError)?;

  Ok(html(status, body))
}

/// Render login page
///
/// A visitor whose session cookie is still valid goes straight to the dashboard.
pub async fn login_page(
  templates: web::Data<TemplateEngine>,
  auth_service: web::Data<Arc<AuthService>>,
  req: HttpRequest,
) -> Result<HttpResponse, actix_web::Error> {
  if let Some(token) = req
    .cookie(SESSION_COOKIE)
    .and_then(|c| SessionToken::from_string(c.value().to_string()).ok())
  {
    if auth_service.validate_session(token).await.is_ok() {
      return Ok(
        HttpResponse::Found()
          .insert_header((header::LOCATION, "/dashboard"))
          .finish(),
      );
    }
  }

  render_login(&templates, StatusCode::OK, None, "", false)
}

/// Storage failures become a plain 503 or 500 page
fn storage_error(e: AuthError) -> actix_web::Error {
  if e.is_unavailable() {
    tracing::error!("Page data unavailable: {}", e);
    actix_web::error::ErrorServiceUnavailable("Service temporarily unavailable")
  } else {
    tracing::error!("Failed to load page data: {}", e);
    actix_web::error::ErrorInternalServerError("Something went wrong")
  }
}

fn render_shell(
  templates: &TemplateEngine,
  template: &str,
  req: &HttpRequest,
  section: NavSection,
  mut context: tera::Context,
) -> Result<HttpResponse, actix_web::Error> {
  let user = get_user(req)?;
  let sidebar = SidebarView::build(UserIdentity::from(&user), req.path());

  context.insert("title", section.label());
  context.insert("section", &section);
  context.insert("section_label", section.label());
  context.insert("section_icon", section.icon());
  context.insert("sidebar", &sidebar);

  let body = templates
    .render(template, &context)
    .map_err(actix_web::error::ErrorInternalServerError)?;

  Ok(html(StatusCode::OK, body))
}

/// Render dashboard page (authenticated)
pub async fn dashboard_page(
  templates: web::Data<TemplateEngine>,
  summary_use_case: web::Data<Arc<GetDashboardSummaryUseCase>>,
  req: HttpRequest,
) -> Result<HttpResponse, actix_web::Error> {
  let summary = summary_use_case.execute().await.map_err(storage_error)?;

  let mut context = tera::Context::new();
  context.insert("summary", &summary);

  render_shell(
    &templates,
    "pages/dashboard.html.tera",
    &req,
    NavSection::Dashboard,
    context,
  )
}

/// Render the "Kelola Pengguna" user table (authenticated)
pub async fn users_page(
  templates: web::Data<TemplateEngine>,
  list_use_case: web::Data<Arc<ListUsersUseCase>>,
  req: HttpRequest,
) -> Result<HttpResponse, actix_web::Error> {
  let viewer = get_user(&req)?;
  let users = list_use_case
    .execute(ListUsersCommand {
      viewer_id: viewer.id,
      limit: ListUsersUseCase::DEFAULT_LIMIT,
    })
    .await
    .map_err(storage_error)?;

  let mut context = tera::Context::new();
  context.insert("users", &users);

  render_shell(
    &templates,
    "pages/users.html.tera",
    &req,
    NavSection::Users,
    context,
  )
}

/// Render one sidebar section (authenticated); unknown slugs are 404
pub async fn section_page(
  path: web::Path<String>,
  templates: web::Data<TemplateEngine>,
  req: HttpRequest,
) -> Result<HttpResponse, actix_web::Error> {
  let Some(section) = NavSection::from_slug(&path) else {
    return Ok(
      HttpResponse::NotFound()
        .content_type("text/plain; charset=utf-8")
        .body("Page not found"),
    );
  };

  render_shell(
    &templates,
    "pages/section.html.tera",
    &req,
    section,
    tera::Context::new(),
  )
}
