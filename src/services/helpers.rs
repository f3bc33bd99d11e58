//! Shared utilities used across the service modules.
//!
//! Contains row mapping helpers, short-code generation, and the password
//! hashing wrappers used for both account and link passwords.

use nanoid::nanoid;

use crate::constants::{BCRYPT_COST, SHORT_CODE_ALPHABET, SHORT_CODE_LENGTH};
use crate::errors::AppError;
use crate::models::{Link, User};

// ============================================================================
// Row Mapping Helpers
// ============================================================================

/// Map a database row to a User struct
pub(super) fn map_user_row(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        password_hash: row.get(2)?,
        created_at: row.get(3)?,
    })
}

/// Map a database row to a Link struct
pub(super) fn map_link_row(row: &rusqlite::Row) -> rusqlite::Result<Link> {
    Ok(Link {
        id: row.get(0)?,
        original_url: row.get(1)?,
        short_code: row.get(2)?,
        custom_short_code: row.get(3)?,
        password_hash: row.get(4)?,
        description: row.get(5)?,
        is_active: row.get::<_, i32>(6)? == 1,
        user_id: row.get(7)?,
        created_at: row.get(8)?,
    })
}

// ============================================================================
// Short Code Generation
// ============================================================================

/// Generate a random 7-character short code using nanoid's CSPRNG.
///
/// The generator itself performs no uniqueness check: the UNIQUE constraint
/// on `links.short_code` is the final authority, and there is no retry on a
/// generated-code collision (36^7 combinations make it negligible; a
/// collision surfaces as an insert conflict).
pub fn generate_short_code() -> String {
    nanoid!(SHORT_CODE_LENGTH, &SHORT_CODE_ALPHABET)
}

// ============================================================================
// Password Hashing
// ============================================================================

/// Hash a plaintext password with bcrypt.
///
/// Used identically for account passwords and link passwords. Failures (e.g.
/// resource exhaustion) propagate as server errors.
pub fn hash_password(plaintext: &str) -> Result<String, AppError> {
    bcrypt::hash(plaintext, BCRYPT_COST)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))
}

/// Verify a plaintext password against a stored bcrypt digest
pub fn verify_password(plaintext: &str, digest: &str) -> Result<bool, AppError> {
    bcrypt::verify(plaintext, digest)
        .map_err(|e| AppError::internal(format!("Failed to verify password: {}", e)))
}
