//! Link CRUD, resolution, and password-gate services.

use rusqlite::{params, OptionalExtension};

use super::helpers::{generate_short_code, hash_password, map_link_row, verify_password};
use crate::db::{get_conn, DbConnection, DbPool};
use crate::errors::AppError;
use crate::models::{Link, LinkDetailsResponse, ShortenRequest, UpdateLinkRequest};
use crate::queries::Links;

/// Where a resolved short code should send the visitor.
///
/// The actual external hop happens on the frontend landing page so that
/// password prompts and interstitials render uniformly; the server only ever
/// redirects to a frontend destination parameterized by the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectTarget {
    /// Unprotected link: send to the landing page for the code
    Landing,
    /// Protected link: send to the password-entry page for the code
    PasswordEntry,
}

// ============================================================================
// Link Manager
// ============================================================================

/// Create a new short link owned by `user_id`, returning the stored record.
///
/// Custom codes are pre-checked twice (globally, then scoped to the owner
/// right before the insert) to narrow the race window; the UNIQUE constraint
/// on `short_code` remains the final authority, so a concurrent duplicate
/// insert still fails as a conflict rather than silently overwriting.
pub fn create_link(pool: &DbPool, request: &ShortenRequest, user_id: i64) -> Result<Link, AppError> {
    let conn = get_conn(pool)?;

    let short_code = match &request.custom_short_code {
        Some(code) => {
            if code_in_use(&conn, code)? {
                return Err(AppError::custom_code_taken());
            }
            code.clone()
        }
        // No retry on a generated-code collision; it would surface as an
        // insert conflict (known gap, see generate_short_code)
        None => generate_short_code(),
    };

    if let Some(code) = &request.custom_short_code {
        if code_in_use_by_user(&conn, code, user_id)? {
            return Err(AppError::custom_code_taken());
        }
    }

    let password_hash = match request.password.as_deref() {
        Some(password) if !password.is_empty() => Some(hash_password(password)?),
        _ => None,
    };

    let is_active = request.is_active.unwrap_or(true);

    conn.execute(
        Links::INSERT,
        params![
            request.original_url,
            short_code,
            request.custom_short_code,
            password_hash,
            request.description,
            is_active as i32,
            user_id
        ],
    )?;

    let link_id = conn.last_insert_rowid();
    let link = conn.query_row(Links::SELECT_BY_ID, params![link_id], map_link_row)?;

    log::info!(
        "Created short link: {} -> {} (user: {})",
        link.short_code,
        link.original_url,
        user_id
    );

    Ok(link)
}

/// Check if a code is already taken as a short code
fn code_in_use(conn: &DbConnection, code: &str) -> Result<bool, AppError> {
    let count: i32 = conn.query_row(Links::COUNT_BY_SHORT_CODE, params![code], |row| row.get(0))?;
    Ok(count > 0)
}

/// Owner-scoped re-check run immediately before the insert
fn code_in_use_by_user(conn: &DbConnection, code: &str, user_id: i64) -> Result<bool, AppError> {
    let count: i32 = conn.query_row(
        Links::COUNT_BY_SHORT_CODE_AND_USER,
        params![code, user_id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Look up a link by short code or custom alias (resolution lookup)
fn find_link_by_code(conn: &DbConnection, code: &str) -> Result<Option<Link>, AppError> {
    Ok(conn
        .query_row(Links::SELECT_BY_CODE, params![code], map_link_row)
        .optional()?)
}

/// List all links owned by a user, newest first
pub fn list_links(pool: &DbPool, user_id: i64) -> Result<Vec<Link>, AppError> {
    let conn = get_conn(pool)?;
    let mut stmt = conn.prepare(Links::LIST_BY_USER)?;

    let links = stmt
        .query_map(params![user_id], map_link_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(links)
}

/// Partially update a link owned by `user_id`.
///
/// Fields absent from the request are left unchanged. An explicit null or
/// empty `password` clears the link's protection; a non-empty one replaces
/// it with a fresh digest.
pub fn update_link(
    pool: &DbPool,
    id: i64,
    user_id: i64,
    request: &UpdateLinkRequest,
) -> Result<Link, AppError> {
    let conn = get_conn(pool)?;

    let link = conn
        .query_row(Links::SELECT_BY_ID, params![id], map_link_row)
        .optional()?
        .ok_or_else(AppError::link_not_found)?;

    if link.user_id != Some(user_id) {
        return Err(AppError::access_denied());
    }

    let original_url = match request.original_url.as_deref() {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => link.original_url,
    };

    let description = match &request.description {
        Some(replacement) => replacement.clone(),
        None => link.description,
    };

    let is_active = request.is_active.unwrap_or(link.is_active);

    let password_hash = match &request.password {
        None => link.password_hash,
        Some(Some(password)) if !password.is_empty() => Some(hash_password(password)?),
        // Explicitly empty or null: remove the password gate
        Some(_) => None,
    };

    conn.execute(
        Links::UPDATE_BY_ID,
        params![original_url, description, is_active as i32, password_hash, id],
    )?;

    let updated = conn.query_row(Links::SELECT_BY_ID, params![id], map_link_row)?;
    log::info!("Updated link ID {} (user: {})", id, user_id);

    Ok(updated)
}

/// Delete a link owned by `user_id`
pub fn delete_link(pool: &DbPool, id: i64, user_id: i64) -> Result<(), AppError> {
    let conn = get_conn(pool)?;

    let link = conn
        .query_row(Links::SELECT_BY_ID, params![id], map_link_row)
        .optional()?
        .ok_or_else(AppError::link_not_found)?;

    if link.user_id != Some(user_id) {
        return Err(AppError::access_denied());
    }

    conn.execute(Links::DELETE_BY_ID, params![id])?;
    log::info!("Deleted link ID {} (user: {})", id, user_id);

    Ok(())
}

// ============================================================================
// Link Resolver
// ============================================================================

/// Decide where a visit to `/{code}` should go.
///
/// Missing and inactive links produce the same ambiguous 404 so the
/// existence of disabled links is never leaked. Unprotected targets are
/// restricted to http/https before any redirect is issued.
pub fn resolve_redirect(pool: &DbPool, code: &str) -> Result<RedirectTarget, AppError> {
    let conn = get_conn(pool)?;

    let link = find_link_by_code(&conn, code)?.ok_or(AppError::NotFoundOrInactive)?;
    if !link.is_active {
        return Err(AppError::NotFoundOrInactive);
    }

    if link.requires_password() {
        return Ok(RedirectTarget::PasswordEntry);
    }

    let parsed = url::Url::parse(&link.original_url).map_err(|e| {
        log::error!("Invalid originalUrl for redirection: {}", e);
        AppError::InvalidRedirect
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        log::error!(
            "Refusing redirect to non-http(s) scheme '{}' for code {}",
            parsed.scheme(),
            code
        );
        return Err(AppError::InvalidRedirect);
    }

    Ok(RedirectTarget::Landing)
}

/// Public detail lookup for the landing page.
///
/// `original_url` is included only when no password is required; protected
/// links never reveal their target pre-verification.
pub fn link_details(pool: &DbPool, code: &str) -> Result<LinkDetailsResponse, AppError> {
    let conn = get_conn(pool)?;

    let link = find_link_by_code(&conn, code)?.ok_or(AppError::NotFoundOrInactive)?;
    if !link.is_active {
        return Err(AppError::NotFoundOrInactive);
    }

    let requires_password = link.requires_password();
    Ok(LinkDetailsResponse {
        requires_password,
        description: link.description,
        original_url: if requires_password {
            None
        } else {
            Some(link.original_url)
        },
    })
}

/// Verify a protected link's password and return its target URL.
///
/// A missing link and a link without a password collapse into the same 404,
/// matching the ambiguity used by the redirect path.
pub fn verify_link_password(pool: &DbPool, code: &str, password: &str) -> Result<String, AppError> {
    let conn = get_conn(pool)?;

    let link = find_link_by_code(&conn, code)?.ok_or(AppError::NotFoundOrUnprotected)?;
    let digest = link
        .password_hash
        .as_deref()
        .ok_or(AppError::NotFoundOrUnprotected)?;

    if !verify_password(password, digest)? {
        return Err(AppError::Unauthorized("Incorrect password".into()));
    }

    Ok(link.original_url)
}
