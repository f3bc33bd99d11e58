//! Account registration and login endpoints.

use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::config::Config;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::{CredentialsRequest, LoginResponse, RegisterResponse};
use crate::services;

#[post("/register")]
pub async fn register(
    pool: web::Data<DbPool>,
    request: web::Json<CredentialsRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let user_id = services::register_user(&pool, &request.email, &request.password)?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "User registered successfully".to_string(),
        user_id,
    }))
}

/// Login deliberately skips field validation: a malformed email or a short
/// password must be indistinguishable from wrong credentials.
#[post("/login")]
pub async fn login(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    request: web::Json<CredentialsRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = services::login_user(&pool, &request.email, &request.password)?;
    let token = services::issue_token(&config.jwt_secret, user_id)?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Logged in successfully.".to_string(),
        token,
    }))
}
