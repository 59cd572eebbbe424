#[cfg(feature = "server")]
use std::sync::Arc;
#[cfg(feature = "server")]
use std::time::Duration;

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::db::{establish_connection_pool, run_migrations};
#[cfg(feature = "server")]
use crate::mailer::{EmailProvider, ResendProvider};
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::DieselRepository;
#[cfg(feature = "server")]
use crate::services::rate_limit::RateLimiter;

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "data")]
mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod mailer;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "server")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "server")]
pub mod services;
#[cfg(feature = "data")]
pub mod session;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;
    run_migrations(&pool).map_err(std::io::Error::other)?;

    let repo = DieselRepository::new(pool);

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    // Counters must be shared by every worker, so the limiter is built once.
    let limiter = web::Data::new(RateLimiter::new(
        server_config.rate_limit_max_requests,
        Duration::from_secs(server_config.rate_limit_window_secs),
    ));

    if !server_config.email_configured() {
        log::warn!("Email API key is not set; send-email requests will fail");
    }
    let provider: Arc<dyn EmailProvider> = Arc::new(ResendProvider::new(
        server_config.email_api_url.clone(),
        server_config.email_api_key.clone(),
    ));
    let provider = web::Data::from(provider);

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Starting HopiGo API on {}:{}",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
            .app_data(limiter.clone())
            .app_data(provider.clone())
            .configure(routes::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
