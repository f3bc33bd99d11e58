//! Link management and resolution endpoints under `/api/urls`.
//!
//! `shorten` and `verify_password` are plain functions rather than attribute
//! macros because they are registered behind per-route rate-limit middleware.

use actix_web::{delete, get, put, web, HttpResponse};
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::config::Config;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::metrics::AppMetrics;
use crate::models::{
    LinkResponse, MessageResponse, ShortenRequest, ShortenResponse, UpdateLinkRequest,
    UpdateLinkResponse, VerifyPasswordRequest, VerifyPasswordResponse,
};
use crate::services;

/// POST /api/urls/shorten (authenticated, rate-limited)
pub async fn shorten(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    metrics: web::Data<AppMetrics>,
    user: AuthenticatedUser,
    request: web::Json<ShortenRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let link = services::create_link(&pool, &request, user.user_id)?;
    metrics.record_link_created();

    Ok(HttpResponse::Ok().json(ShortenResponse {
        message: "URL shortened successfully".to_string(),
        short_url: format!("{}/{}", config.base_url, link.short_code),
        id: link.id,
    }))
}

/// GET /api/urls/my-urls (authenticated)
#[get("/my-urls")]
pub async fn my_urls(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let links = services::list_links(&pool, user.user_id)?;
    let body: Vec<LinkResponse> = links.into_iter().map(LinkResponse::from_link).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// PUT /api/urls/{id} (authenticated, owner only)
#[put("/{id}")]
pub async fn update(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
    request: web::Json<UpdateLinkRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let link = services::update_link(&pool, path.into_inner(), user.user_id, &request)?;

    Ok(HttpResponse::Ok().json(UpdateLinkResponse {
        message: "URL updated successfully".to_string(),
        url: LinkResponse::from_link(link),
    }))
}

/// DELETE /api/urls/{id} (authenticated, owner only)
#[delete("/{id}")]
pub async fn delete(
    pool: web::Data<DbPool>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    services::delete_link(&pool, path.into_inner(), user.user_id)?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("URL deleted successfully")))
}

/// GET /api/urls/url-details/{shortCode} (public)
#[get("/url-details/{short_code}")]
pub async fn url_details(
    pool: web::Data<DbPool>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let details = services::link_details(&pool, &path)?;
    Ok(HttpResponse::Ok().json(details))
}

/// POST /api/urls/verify-password (public, rate-limited)
pub async fn verify_password(
    pool: web::Data<DbPool>,
    metrics: web::Data<AppMetrics>,
    request: web::Json<VerifyPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    // Both fields are present and non-empty once validation passes
    let code = request.short_code.as_deref().unwrap_or_default();
    let password = request.password.as_deref().unwrap_or_default();

    let result = services::verify_link_password(&pool, code, password);
    metrics.record_password_verification(result.is_ok());

    let original_url = result?;
    Ok(HttpResponse::Ok().json(VerifyPasswordResponse { original_url }))
}
