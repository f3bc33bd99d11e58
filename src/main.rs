//! URL shortener service.
//!
//! Accounts, short-link CRUD, password-protected links, and a root redirect
//! route, backed by SQLite.

mod auth;
mod config;
mod constants;
mod db;
mod errors;
mod handlers;
mod metrics;
mod models;
mod queries;
mod services;
mod test_utils;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware::Logger, web, App, HttpServer};
use prometheus::Registry;

use crate::config::Config;
use crate::metrics::AppMetrics;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();

    let pool = db::init_pool(&config.database_url).expect("Failed to create database pool");
    db::run_migrations(&pool).expect("Failed to run database migrations");

    let registry = Registry::new();
    let app_metrics = AppMetrics::new(&registry).expect("Failed to register metrics");

    let shorten_limits = handlers::shorten_rate_limits();
    let verify_limits = handlers::verify_password_rate_limits();

    let bind_addr = (config.host.clone(), config.port);
    log::info!(
        "Starting server at http://{}:{} (base URL: {})",
        config.host,
        config.port,
        config.base_url
    );

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
            .max_age(3600);
        for origin in &config.cors_allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(registry.clone()))
            .app_data(web::Data::new(app_metrics.clone()))
            .configure(|cfg| handlers::configure_routes(cfg, &shorten_limits, &verify_limits))
    })
    .bind(bind_addr)?
    .run()
    .await
}
