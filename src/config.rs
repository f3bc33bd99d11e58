//! Application configuration module.
//!
//! Handles loading configuration from environment variables.

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database file path
    pub database_url: String,
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Base URL for generating short links
    pub base_url: String,
    /// Frontend base URL that redirects point at
    pub frontend_base_url: String,
    /// Secret used to sign and verify bearer tokens
    pub jwt_secret: String,
    /// Origins allowed by the CORS policy
    pub cors_allowed_origins: Vec<String>,
    /// Enable Prometheus metrics endpoint
    pub metrics_enabled: bool,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// # Environment Variables
    /// - `DATABASE_URL`: Path to SQLite database (default: "shortlink.db")
    /// - `HOST`: Server host (default: "127.0.0.1")
    /// - `PORT`: Server port (default: 8080)
    /// - `BASE_URL`: Base URL for short links (default: "http://{host}:{port}")
    /// - `FRONTEND_BASE_URL`: Base URL of the landing frontend
    ///   (default: "http://localhost:5173")
    /// - `JWT_SECRET`: Token signing secret (required)
    /// - `CORS_ALLOWED_ORIGINS`: Comma-separated list of allowed origins
    ///   (default: the local frontend dev origins)
    /// - `METRICS_ENABLED`: Enable Prometheus metrics endpoint (default: true)
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .expect("PORT must be a valid number");

        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| format!("http://{}:{}", host, port));

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_else(|_| default_cors_origins());

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "shortlink.db".to_string()),
            host,
            port,
            base_url,
            frontend_base_url: env::var("FRONTEND_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            cors_allowed_origins,
            metrics_enabled: env::var("METRICS_ENABLED")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),
        }
    }
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:5173".to_string(),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "shortlink.db".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8080,
            base_url: "http://localhost:8080".to_string(),
            frontend_base_url: "http://localhost:5173".to_string(),
            jwt_secret: "insecure-default-secret-for-tests-only".to_string(),
            cors_allowed_origins: default_cors_origins(),
            metrics_enabled: true,
        }
    }
}
