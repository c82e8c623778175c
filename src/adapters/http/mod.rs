pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod templates;

pub use errors::{ApiError, LoginErrorKind};
pub use handlers::web_auth::SessionCookieSettings;
pub use middleware::{RequestId, RequestIdExt, RequestIdMiddleware, WebAuthMiddleware};
pub use routes::{AppDependencies, configure_auth_api_routes, configure_web_routes};
pub use templates::TemplateEngine;
