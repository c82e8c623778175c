use actix_files as fs;
use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quizku_admin::{
  adapters::http::{
    AppDependencies, RequestIdMiddleware, SessionCookieSettings, TemplateEngine,
    configure_auth_api_routes, configure_web_routes,
  },
  application::auth::{
    EnsureAdminAccountCommand, EnsureAdminAccountOutcome, EnsureAdminAccountUseCase,
  },
  domain::auth::{ports::UserRepository, services::AuthService},
  infrastructure::{
    config::Config,
    persistence::postgres::{
      PostgresLoginAttemptRepository, PostgresSessionRepository, PostgresUserRepository,
    },
    security::{Argon2PasswordHasher, SecureTokenGenerator},
  },
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "quizku_admin=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting Quizku admin");

  let config = Config::load().context("Failed to load configuration")?;
  tracing::info!("Configuration loaded successfully");

  tracing::info!("Connecting to database");
  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    anyhow::anyhow!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    )
  })?
  .context("Could not connect to database")?;
  tracing::info!("Database connection pool created");

  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .context("Failed to run database migrations")?;
  tracing::info!("Database migrations completed");

  let hashing = &config.security.password_hashing;
  let password_hasher = Argon2PasswordHasher::with_params(
    hashing.memory_kib,
    hashing.iterations,
    hashing.parallelism,
  )
  .context("Invalid password hashing parameters")?;

  let user_repo: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(db_pool.clone()));
  let auth_service = Arc::new(AuthService::new(
    user_repo.clone(),
    Arc::new(PostgresSessionRepository::new(db_pool.clone())),
    Arc::new(PostgresLoginAttemptRepository::new(db_pool.clone())),
    Arc::new(password_hasher),
    Arc::new(SecureTokenGenerator::new()),
    config.auth_service_config(),
  ));

  if let Some(admin) = config.admin.clone() {
    let outcome = EnsureAdminAccountUseCase::new(auth_service.clone())
      .execute(EnsureAdminAccountCommand {
        email: admin.email,
        password: admin.password,
        full_name: admin.full_name,
      })
      .await
      .context("Failed to bootstrap the administrator account")?;

    match outcome {
      EnsureAdminAccountOutcome::Created(user) => {
        tracing::info!(user_id = %user.id, "Administrator account created")
      }
      EnsureAdminAccountOutcome::AlreadyExists => {
        tracing::debug!("Administrator account already present")
      }
    }
  }

  spawn_housekeeping(
    auth_service.clone(),
    Duration::from_secs(config.security.session_purge_interval_seconds.max(1)),
  );

  let templates = TemplateEngine::from_dir(&config.server.templates_dir)
    .context("Failed to load templates")?;
  let deps = AppDependencies::new(
    templates,
    auth_service,
    user_repo,
    SessionCookieSettings {
      secure: config.security.cookie_secure,
    },
  );

  let server_host = config.server.host.clone();
  let server_port = config.server.port;
  let static_dir = config.server.static_dir.clone();

  tracing::info!("Listening on http://{}:{}", server_host, server_port);

  HttpServer::new(move || {
    App::new()
      .wrap(Logger::default())
      .wrap(RequestIdMiddleware::new())
      .configure(|cfg| configure_auth_api_routes(cfg, deps.clone()))
      .configure(|cfg| configure_web_routes(cfg, deps.clone()))
      .service(fs::Files::new("/static", &static_dir))
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))
  .with_context(|| format!("Failed to bind {}:{}", server_host, server_port))?
  .run()
  .await
  .context("HTTP server error")
}

/// Periodically deletes expired sessions and login attempts outside the throttling window
fn spawn_housekeeping(auth_service: Arc<AuthService>, every: Duration) {
  tokio::spawn(async move {
    let mut interval = tokio::time::interval(every);
    loop {
      interval.tick().await;
      match auth_service.purge_expired_sessions().await {
        Ok(0) => {}
        Ok(purged) => tracing::info!(purged, "Purged expired sessions"),
        Err(e) => tracing::warn!("Session purge failed: {}", e),
      }
      match auth_service.purge_stale_login_attempts().await {
        Ok(0) => {}
        Ok(purged) => tracing::info!(purged, "Purged stale login attempts"),
        Err(e) => tracing::warn!("Login attempt purge failed: {}", e),
      }
    }
  });
}

/// Health check endpoint
async fn health_check() -> &'static str {
  "OK"
}
