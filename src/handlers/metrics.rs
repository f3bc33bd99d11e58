//! Prometheus scrape endpoint.

use actix_web::{get, web, HttpResponse};
use prometheus::Registry;

use crate::config::Config;
use crate::errors::AppError;
use crate::metrics;

#[get("/metrics")]
pub async fn scrape(
    config: web::Data<Config>,
    registry: web::Data<Registry>,
) -> Result<HttpResponse, AppError> {
    if !config.metrics_enabled {
        return Ok(HttpResponse::NotFound().finish());
    }

    let body = metrics::render(&registry)?;
    Ok(HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(body))
}
