//! Test utilities shared across unit and integration tests.

#![cfg(test)]

use std::sync::atomic::{AtomicUsize, Ordering};

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::config::Config;
use crate::db::{run_migrations, DbPool};
use crate::models::ShortenRequest;

static TEST_DB_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Create a fresh in-memory database pool with migrations applied.
///
/// Each call gets its own uniquely named shared-cache in-memory database so
/// the pool's connections see the same data while separate tests stay
/// isolated from each other.
pub fn setup_test_db() -> DbPool {
    let n = TEST_DB_COUNTER.fetch_add(1, Ordering::SeqCst);
    let uri = format!("file:testdb{}?mode=memory&cache=shared", n);

    let manager = SqliteConnectionManager::file(uri);
    let pool = Pool::builder()
        .max_size(5)
        .build(manager)
        .expect("Failed to create test pool");

    run_migrations(&pool).expect("Failed to run test migrations");
    pool
}

/// Configuration suitable for tests (fixed secret, local URLs)
pub fn test_config() -> Config {
    Config::default()
}

/// A minimal valid shorten request for the given URL
pub fn shorten_request(url: &str) -> ShortenRequest {
    ShortenRequest {
        original_url: url.to_string(),
        custom_short_code: None,
        password: None,
        description: None,
        is_active: None,
    }
}
