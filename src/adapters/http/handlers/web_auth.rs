use actix_web::{
  HttpRequest, HttpResponse,
  cookie::{Cookie, SameSite, time::Duration as CookieDuration},
  http::header,
  web,
};
use chrono::Utc;
use std::sync::Arc;

use super::pages::render_login;
use super::{extract_ip_address, extract_user_agent};
use crate::adapters::http::dtos::LoginForm;
use crate::adapters::http::errors::LoginErrorKind;
use crate::adapters::http::middleware::SESSION_COOKIE;
use crate::adapters::http::templates::TemplateEngine;
use crate::application::auth::{LoginUserCommand, LoginUserUseCase, LogoutUserUseCase};
use crate::domain::auth::errors::AuthError;

/// Attributes applied to the session cookie
#[derive(Debug, Clone, Copy)]
pub struct SessionCookieSettings {
  pub secure: bool,
}

fn is_htmx(req: &HttpRequest) -> bool {
  req.headers().contains_key("HX-Request")
}

/// Handle login form submission
///
/// Success sets the session cookie and sends the browser to `/dashboard`
/// (303, or `HX-Redirect` for HTMX). Failure re-renders the form with the
/// reason and the submitted email; it never redirects.
pub async fn login_submit(
  form: web::Form<LoginForm>,
  use_case: web::Data<Arc<LoginUserUseCase>>,
  templates: web::Data<TemplateEngine>,
  cookie_settings: web::Data<SessionCookieSettings>,
  req: HttpRequest,
) -> Result<HttpResponse, actix_web::Error> {
  let form = form.into_inner();
  let email = form.email.clone();

  let command = LoginUserCommand {
    email: form.email,
    password: form.password,
    remember_me: false,
  };

  match use_case
    .execute(command, extract_ip_address(&req), extract_user_agent(&req))
    .await
  {
    Ok(response) => {
      tracing::info!("Login successful for user_id={}", response.user_id);

      let max_age = (response.expires_at - Utc::now()).num_seconds().max(0);
      let cookie = Cookie::build(SESSION_COOKIE, response.session_token)
        .path("/")
        .http_only(true)
        .secure(cookie_settings.secure)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::seconds(max_age))
        .finish();

      if is_htmx(&req) {
        Ok(
          HttpResponse::Ok()
            .cookie(cookie)
            .insert_header(("HX-Redirect", "/dashboard"))
            .finish(),
        )
      } else {
        Ok(
          HttpResponse::SeeOther()
            .cookie(cookie)
            .insert_header((header::LOCATION, "/dashboard"))
            .finish(),
        )
      }
    }
    Err(e) => {
      let kind = LoginErrorKind::from_auth_error(&e);
      match kind {
        LoginErrorKind::ServerError => tracing::error!("Login failed: {}", e),
        LoginErrorKind::ServiceUnavailable => tracing::warn!("Login failed: {}", e),
        _ => tracing::info!("Login rejected: {}", kind.code()),
      }

      render_login(
        &templates,
        kind.status_code(),
        Some(kind.message()),
        &email,
        is_htmx(&req),
      )
    }
  }
}

/// Handle logout: revoke the session, clear the cookie, go to `/login`
pub async fn logout(
  use_case: web::Data<Arc<LogoutUserUseCase>>,
  cookie_settings: web::Data<SessionCookieSettings>,
  req: HttpRequest,
) -> HttpResponse {
  if let Some(cookie) = req.cookie(SESSION_COOKIE) {
    match use_case.execute(cookie.value().to_string()).await {
      Ok(()) => {}
      Err(AuthError::InvalidSession) | Err(AuthError::ValueObject(_)) => {
        tracing::debug!("Logout with an unknown or malformed session cookie");
      }
      Err(e) => tracing::error!("Failed to revoke session on logout: {}", e),
    }
  }

  let cookie = Cookie::build(SESSION_COOKIE, "")
    .path("/")
    .http_only(true)
    .secure(cookie_settings.secure)
    .same_site(SameSite::Lax)
    .max_age(CookieDuration::seconds(0))
    .finish();

  HttpResponse::SeeOther()
    .cookie(cookie)
    .insert_header((header::LOCATION, "/login"))
    .finish()
}
