//! The root redirect route: `GET /{shortCode}`.

use actix_web::{get, web, HttpResponse};

use crate::config::Config;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::metrics::AppMetrics;
use crate::services::{self, RedirectTarget};

/// Resolve a short code and redirect to the frontend.
///
/// Unprotected links land on `{frontend}/{code}`, protected ones on
/// `{frontend}/protected-link/{code}`; the target URL itself is never the
/// redirect destination.
#[get("/{short_code}")]
pub async fn redirect(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    metrics: web::Data<AppMetrics>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let code = path.into_inner();

    // Browsers probe these on every visit; don't treat them as codes
    if code == "favicon.ico" || code == "robots.txt" {
        return Ok(HttpResponse::NotFound().finish());
    }

    let target = services::resolve_redirect(&pool, &code)?;
    metrics.record_redirect();

    let location = match target {
        RedirectTarget::Landing => format!("{}/{}", config.frontend_base_url, code),
        RedirectTarget::PasswordEntry => {
            format!("{}/protected-link/{}", config.frontend_base_url, code)
        }
    };

    Ok(HttpResponse::Found()
        .append_header(("Location", location))
        .finish())
}
