//! Bearer-token authentication extractor.
//!
//! Handlers that take an [`AuthenticatedUser`] argument require a valid
//! `Authorization: Bearer <token>` header; extraction fails the request
//! before the handler body runs.

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::config::Config;
use crate::errors::AppError;
use crate::metrics::AppMetrics;
use crate::services::verify_token;

/// The identity proven by the request's bearer token
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: i64,
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

/// Pull the bearer token off the request and verify it.
///
/// A missing or malformed header is a 401; a present token that fails
/// verification (bad signature, expired) is a 403.
fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
    let config = req
        .app_data::<web::Data<Config>>()
        .ok_or_else(|| AppError::internal("Config not available in app data"))?;

    let token = bearer_token(req).ok_or_else(AppError::missing_token)?;

    let result = verify_token(&config.jwt_secret, token);

    if let Some(metrics) = req.app_data::<web::Data<AppMetrics>>() {
        metrics.record_token_validation(result.is_ok());
    }

    let user_id = result?;
    Ok(AuthenticatedUser { user_id })
}

/// Extract the token from an `Authorization: Bearer ...` header
fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
}
