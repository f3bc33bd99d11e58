//! HTTP handlers and route configuration.

pub mod auth;
pub mod health;
pub mod links;
pub mod metrics;
pub mod redirect;

use actix_governor::{Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor};
use actix_web::web;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;

use crate::constants::{
    SHORTEN_BURST_SIZE, SHORTEN_REPLENISH_SECS, VERIFY_PASSWORD_BURST_SIZE,
    VERIFY_PASSWORD_REPLENISH_SECS,
};

/// Per-peer-IP rate limit configuration with the default (headers-only)
/// response middleware
pub type RateLimitConfig = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>>;

/// Rate limits for link creation: a burst of 10, replenishing one slot every
/// 90 seconds (10 per 15 minutes sustained)
pub fn shorten_rate_limits() -> RateLimitConfig {
    GovernorConfigBuilder::default()
        .per_second(SHORTEN_REPLENISH_SECS)
        .burst_size(SHORTEN_BURST_SIZE)
        .finish()
        .expect("shorten rate limit configuration must be valid")
}

/// Rate limits for password verification: a burst of 5, replenishing one slot
/// every 180 seconds (5 per 15 minutes sustained)
pub fn verify_password_rate_limits() -> RateLimitConfig {
    GovernorConfigBuilder::default()
        .per_second(VERIFY_PASSWORD_REPLENISH_SECS)
        .burst_size(VERIFY_PASSWORD_BURST_SIZE)
        .finish()
        .expect("verify-password rate limit configuration must be valid")
}

/// Register all routes.
///
/// The catch-all redirect route is registered last so that `/health`,
/// `/metrics`, and everything under `/api` take precedence.
pub fn configure_routes(
    cfg: &mut web::ServiceConfig,
    shorten_limits: &RateLimitConfig,
    verify_limits: &RateLimitConfig,
) {
    cfg.service(
        web::scope("/api")
            .service(
                web::scope("/auth")
                    .service(auth::register)
                    .service(auth::login),
            )
            .service(
                web::scope("/urls")
                    .service(
                        web::resource("/shorten")
                            .wrap(Governor::new(shorten_limits))
                            .route(web::post().to(links::shorten)),
                    )
                    .service(
                        web::resource("/verify-password")
                            .wrap(Governor::new(verify_limits))
                            .route(web::post().to(links::verify_password)),
                    )
                    .service(links::my_urls)
                    .service(links::url_details)
                    .service(links::update)
                    .service(links::delete),
            ),
    )
    .service(health::health)
    .service(metrics::scrape)
    .service(redirect::redirect);
}
