pub mod auth;
pub mod pages;
pub mod web_auth;

use actix_web::{HttpMessage, HttpRequest};
use std::net::IpAddr;

use crate::domain::auth::entities::User;

/// Extract the user attached by `WebAuthMiddleware`
pub fn get_user(req: &HttpRequest) -> Result<User, actix_web::Error> {
  let user = req.extensions().get::<User>().cloned();

  if user.is_none() {
    tracing::warn!(
      "get_user: User not found in request extensions for path {}",
      req.path()
    );
  }

  user.ok_or_else(|| actix_web::error::ErrorUnauthorized("Not authenticated"))
}

/// Client IP as reported by the connection (or a trusted forwarding header)
pub(crate) fn extract_ip_address(req: &HttpRequest) -> Option<IpAddr> {
  let conn = req.connection_info();
  let addr = conn.realip_remote_addr()?;
  // "1.2.3.4:5678" or "[::1]:5678" when a port is attached
  addr
    .parse::<IpAddr>()
    .ok()
    .or_else(|| addr.parse::<std::net::SocketAddr>().ok().map(|s| s.ip()))
}

pub(crate) fn extract_user_agent(req: &HttpRequest) -> Option<String> {
  req
    .headers()
    .get("User-Agent")
    .and_then(|h| h.to_str().ok())
    .map(|s| s.to_string())
}
