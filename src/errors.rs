//! Custom error types for the URL shortener application.
//!
//! Implements proper error handling with automatic HTTP response conversion.
//! The two deliberately ambiguous not-found variants exist so that resolution
//! endpoints never reveal whether a hidden link exists.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

use crate::models::{ErrorResponse, FieldError, ValidationErrorResponse};

/// Application-level errors
#[derive(Debug)]
pub enum AppError {
    /// Invalid input data, with per-field messages
    ValidationError(Vec<FieldError>),
    /// The stored target URL is not a safe redirect destination
    InvalidRedirect,
    /// Missing credential or failed credential check
    Unauthorized(String),
    /// A bearer token was presented but did not verify
    InvalidToken(String),
    /// Authenticated but not allowed (ownership violation)
    Forbidden(String),
    /// Resource was not found
    NotFound(String),
    /// Link missing or disabled; the two causes are deliberately conflated
    NotFoundOrInactive,
    /// Link missing or has no password; deliberately conflated as well
    NotFoundOrUnprotected,
    /// Short code already exists
    DuplicateCode(String),
    /// Email already registered
    EmailAlreadyExists(String),
    /// Database operation failed
    DatabaseError(String),
    /// Internal server error
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(errors) => {
                write!(f, "Validation error: ")?;
                for (i, e) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}: {}", e.field, e.message)?;
                }
                Ok(())
            }
            AppError::InvalidRedirect => write!(f, "Invalid URL for redirection"),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::InvalidToken(msg) => write!(f, "Invalid token: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::NotFoundOrInactive => write!(f, "URL not found or inactive"),
            AppError::NotFoundOrUnprotected => {
                write!(f, "URL not found or does not require a password")
            }
            AppError::DuplicateCode(msg) => write!(f, "Duplicate code: {}", msg),
            AppError::EmailAlreadyExists(msg) => write!(f, "Email already exists: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

// ============================================================================
// Constructor Methods
// ============================================================================

impl AppError {
    /// Create a ValidationError for a single field
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        AppError::ValidationError(vec![FieldError {
            field: field.to_string(),
            message: message.into(),
        }])
    }

    /// Create an Unauthorized error for a request without a bearer token
    pub fn missing_token() -> Self {
        AppError::Unauthorized("Authentication token required.".into())
    }

    /// Create an InvalidToken error for a token that failed verification
    pub fn invalid_token() -> Self {
        AppError::InvalidToken("Invalid or expired token.".into())
    }

    /// Create an Unauthorized error for a failed login; the message is
    /// identical for unknown emails and wrong passwords
    pub fn bad_credentials() -> Self {
        AppError::Unauthorized("Invalid email or password".into())
    }

    /// Create a Forbidden error for a resource ownership violation
    pub fn access_denied() -> Self {
        AppError::Forbidden("Access denied".into())
    }

    /// Create a NotFound error for a link by ID
    pub fn link_not_found() -> Self {
        AppError::NotFound("URL not found".into())
    }

    /// Create a DuplicateCode error for a taken custom short code
    pub fn custom_code_taken() -> Self {
        AppError::DuplicateCode("Custom short code already in use.".into())
    }

    /// Create an InternalError with a message
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::InternalError(message.into())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidRedirect => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::InvalidToken(_) => StatusCode::FORBIDDEN,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::NotFoundOrInactive => StatusCode::NOT_FOUND,
            AppError::NotFoundOrUnprotected => StatusCode::NOT_FOUND,
            AppError::DuplicateCode(_) => StatusCode::CONFLICT,
            AppError::EmailAlreadyExists(_) => StatusCode::CONFLICT,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Validation failures carry the per-field message list
        if let AppError::ValidationError(errors) = self {
            return HttpResponse::build(self.status_code()).json(ValidationErrorResponse {
                errors: errors.clone(),
            });
        }

        let (error_code, message) = match self {
            AppError::ValidationError(_) => unreachable!(),
            AppError::InvalidRedirect => {
                ("INVALID_REDIRECT", "Invalid URL for redirection".to_string())
            }
            AppError::Unauthorized(msg) => ("UNAUTHORIZED", msg.clone()),
            AppError::InvalidToken(msg) => ("INVALID_TOKEN", msg.clone()),
            AppError::Forbidden(msg) => ("FORBIDDEN", msg.clone()),
            AppError::NotFound(msg) => ("NOT_FOUND", msg.clone()),
            AppError::NotFoundOrInactive => {
                ("NOT_FOUND", "URL not found or inactive".to_string())
            }
            AppError::NotFoundOrUnprotected => (
                "NOT_FOUND",
                "URL not found or does not require a password".to_string(),
            ),
            AppError::DuplicateCode(msg) => ("DUPLICATE_CODE", msg.clone()),
            AppError::EmailAlreadyExists(msg) => ("EMAIL_ALREADY_EXISTS", msg.clone()),
            // Internal failures are logged server-side; the caller gets a
            // generic body with no details
            AppError::DatabaseError(msg) | AppError::InternalError(msg) => {
                log::error!("Internal error: {}", msg);
                ("SERVER_ERROR", "Server error".to_string())
            }
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse::new(message, error_code))
    }
}

/// Convert rusqlite errors to AppError
///
/// A unique-constraint violation at insert time is a legitimate, expected
/// error path (concurrent duplicate code or email), not a programming error.
impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(sqlite_err, _) = &err {
            if sqlite_err.code == rusqlite::ErrorCode::ConstraintViolation {
                log::warn!("Constraint violation: {:?}", err);
                return AppError::DuplicateCode(
                    "A record with this value already exists".to_string(),
                );
            }
        }
        log::error!("Database error: {:?}", err);
        AppError::DatabaseError(err.to_string())
    }
}

/// Convert r2d2 pool errors to AppError
impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        log::error!("Connection pool error: {:?}", err);
        AppError::DatabaseError(format!("Connection pool error: {}", err))
    }
}

/// Convert validator failures into the field-level list shape
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = Vec::new();
        for (field, errs) in errors.field_errors() {
            for err in errs {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                fields.push(FieldError {
                    field: field.to_string(),
                    message,
                });
            }
        }
        AppError::ValidationError(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::validation("email", "bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidRedirect.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::missing_token().status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::invalid_token().status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::access_denied().status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::link_not_found().status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::NotFoundOrInactive.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::NotFoundOrUnprotected.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::custom_code_taken().status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::EmailAlreadyExists("test".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::DatabaseError("test".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::InternalError("test".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_all_error_variants_have_responses() {
        let errors = vec![
            AppError::validation("field", "test"),
            AppError::InvalidRedirect,
            AppError::missing_token(),
            AppError::invalid_token(),
            AppError::access_denied(),
            AppError::link_not_found(),
            AppError::NotFoundOrInactive,
            AppError::NotFoundOrUnprotected,
            AppError::custom_code_taken(),
            AppError::EmailAlreadyExists("test".into()),
            AppError::DatabaseError("test".into()),
            AppError::InternalError("test".into()),
        ];

        for err in errors {
            let response = err.error_response();
            assert!(response.status().is_client_error() || response.status().is_server_error());
        }
    }

    #[test]
    fn test_ambiguous_variants_have_fixed_messages() {
        assert_eq!(
            AppError::NotFoundOrInactive.to_string(),
            "URL not found or inactive"
        );
        assert_eq!(
            AppError::NotFoundOrUnprotected.to_string(),
            "URL not found or does not require a password"
        );
    }

    #[test]
    fn test_constraint_violation_maps_to_conflict() {
        let sqlite_err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CONSTRAINT),
            Some("UNIQUE constraint failed: links.short_code".into()),
        );
        let err: AppError = sqlite_err.into();
        assert!(matches!(err, AppError::DuplicateCode(_)));
    }
}
