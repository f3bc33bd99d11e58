//! Account registration, login, and bearer token services.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};

use super::helpers::{hash_password, map_user_row, verify_password};
use crate::constants::TOKEN_TTL_SECS;
use crate::db::{get_conn, DbPool};
use crate::errors::AppError;
use crate::queries::Users;

/// Claims carried by an issued bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The authenticated user's ID
    #[serde(rename = "userId")]
    pub user_id: i64,
    /// Expiry as a unix timestamp (1 hour after issuance)
    pub exp: i64,
}

// ============================================================================
// Token Issuer
// ============================================================================

/// Sign a bearer token embedding the user identity with a 1-hour expiry
pub fn issue_token(secret: &str, user_id: i64) -> Result<String, AppError> {
    let claims = Claims {
        user_id,
        exp: Utc::now().timestamp() + TOKEN_TTL_SECS,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(format!("Failed to sign token: {}", e)))
}

/// Verify a bearer token and return the embedded user ID.
///
/// Signature failures and expired tokens both collapse into the same
/// invalid-token rejection.
pub fn verify_token(secret: &str, token: &str) -> Result<i64, AppError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::invalid_token())?;

    Ok(data.claims.user_id)
}

// ============================================================================
// User Management
// ============================================================================

/// Register a new user, returning the new account's ID.
///
/// The pre-check gives a friendly conflict on duplicate email; the UNIQUE
/// constraint closes the remaining race window at insert time.
pub fn register_user(pool: &DbPool, email: &str, password: &str) -> Result<i64, AppError> {
    let conn = get_conn(pool)?;

    let exists: i32 = conn.query_row(Users::COUNT_BY_EMAIL, params![email], |row| row.get(0))?;
    if exists > 0 {
        return Err(AppError::EmailAlreadyExists(
            "User with this email already exists.".into(),
        ));
    }

    let password_hash = hash_password(password)?;

    conn.execute(Users::INSERT, params![email, password_hash])
        .map_err(|e| match &e {
            rusqlite::Error::SqliteFailure(sqlite_err, _)
                if sqlite_err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                AppError::EmailAlreadyExists("User with this email already exists.".into())
            }
            _ => e.into(),
        })?;

    let user_id = conn.last_insert_rowid();
    log::info!("Registered new user: {} (ID: {})", email, user_id);

    Ok(user_id)
}

/// Check login credentials and return the user's ID.
///
/// Unknown emails and wrong passwords produce the same rejection so the two
/// cases are indistinguishable to the caller.
pub fn login_user(pool: &DbPool, email: &str, password: &str) -> Result<i64, AppError> {
    let conn = get_conn(pool)?;

    let user = conn
        .query_row(Users::SELECT_BY_EMAIL, params![email], map_user_row)
        .optional()?;

    let user = match user {
        Some(u) => u,
        None => return Err(AppError::bad_credentials()),
    };

    if !verify_password(password, &user.password_hash)? {
        return Err(AppError::bad_credentials());
    }

    log::info!("User authenticated: ID {}", user.id);
    Ok(user.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    const SECRET: &str = "test-signing-secret";

    #[test]
    fn test_register_and_login() {
        let pool = setup_test_db();

        let user_id = register_user(&pool, "a@x.com", "secret1").unwrap();
        assert!(user_id > 0);

        let logged_in = login_user(&pool, "a@x.com", "secret1").unwrap();
        assert_eq!(logged_in, user_id);
    }

    #[test]
    fn test_register_duplicate_email() {
        let pool = setup_test_db();

        register_user(&pool, "dup@example.com", "secret1").unwrap();
        let result = register_user(&pool, "dup@example.com", "different-pw");
        assert!(matches!(result, Err(AppError::EmailAlreadyExists(_))));
    }

    #[test]
    fn test_login_failures_are_indistinguishable() {
        let pool = setup_test_db();
        register_user(&pool, "real@example.com", "secret1").unwrap();

        let wrong_password = login_user(&pool, "real@example.com", "not-the-password");
        let unknown_email = login_user(&pool, "ghost@example.com", "secret1");

        let msg_a = wrong_password.unwrap_err().to_string();
        let msg_b = unknown_email.unwrap_err().to_string();
        assert_eq!(msg_a, msg_b);
    }

    #[test]
    fn test_token_round_trip() {
        let token = issue_token(SECRET, 42).unwrap();
        let user_id = verify_token(SECRET, &token).unwrap();
        assert_eq!(user_id, 42);
    }

    #[test]
    fn test_token_rejected_with_wrong_secret() {
        let token = issue_token(SECRET, 42).unwrap();
        let result = verify_token("some-other-secret", &token);
        assert!(matches!(result, Err(AppError::InvalidToken(_))));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let result = verify_token(SECRET, "not.a.token");
        assert!(matches!(result, Err(AppError::InvalidToken(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        // Forge a token that expired two hours ago (past any decoding leeway)
        let claims = Claims {
            user_id: 42,
            exp: Utc::now().timestamp() - 7200,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let result = verify_token(SECRET, &token);
        assert!(matches!(result, Err(AppError::InvalidToken(_))));
    }
}
