//! Data models and DTOs (Data Transfer Objects) for the URL shortener.
//!
//! Contains structures for database entities and API request/response types.
//! The wire format is camelCase. Entity structs deliberately do not derive
//! `Serialize`: password digests must never reach a response body, so all
//! exposure goes through the response DTOs below.

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

// ============================================================================
// Database Models
// ============================================================================

/// Represents a user account in the database
#[derive(Debug, Clone)]
pub struct User {
    /// Unique identifier
    pub id: i64,
    /// User's email address (unique, case-sensitive as stored)
    pub email: String,
    /// bcrypt digest of the account password
    pub password_hash: String,
    /// When the user was created
    pub created_at: String,
}

/// Represents a shortened link in the database
#[derive(Debug, Clone)]
pub struct Link {
    /// Unique identifier
    pub id: i64,
    /// The original long URL
    pub original_url: String,
    /// The short code (globally unique)
    pub short_code: String,
    /// User-supplied alias, stored verbatim alongside the short code
    pub custom_short_code: Option<String>,
    /// bcrypt digest of the link password, if the link is protected
    pub password_hash: Option<String>,
    /// Optional description shown on the landing page
    pub description: Option<String>,
    /// Inactive links are invisible to resolution but not to their owner
    pub is_active: bool,
    /// User who owns this link
    pub user_id: Option<i64>,
    /// When the link was created
    pub created_at: String,
}

impl Link {
    /// Whether resolving this link requires a password first
    pub fn requires_password(&self) -> bool {
        self.password_hash.is_some()
    }
}

// ============================================================================
// API Request DTOs
// ============================================================================

/// Request body for user registration and login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CredentialsRequest {
    /// Email address (must be valid format)
    #[validate(email(message = "Invalid email format"))]
    #[validate(length(max = 255, message = "Email is too long (max 255 characters)"))]
    pub email: String,

    /// Account password
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
}

/// Request body for creating a new short link
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// The URL to shorten (must be a valid absolute URL)
    #[validate(url(message = "Invalid URL format"))]
    #[validate(length(max = 2048, message = "URL is too long (max 2048 characters)"))]
    pub original_url: String,

    /// Optional custom short code
    #[validate(length(
        min = 3,
        max = 10,
        message = "Custom short code must be between 3 and 10 characters"
    ))]
    #[validate(custom(function = "validate_code_charset"))]
    pub custom_short_code: Option<String>,

    /// Optional link password; the link becomes protected when set
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: Option<String>,

    /// Optional description
    pub description: Option<String>,

    /// Whether the link resolves immediately (default true)
    pub is_active: Option<bool>,
}

/// Request body for partially updating a link.
///
/// `description` and `password` distinguish between an absent field (leave
/// unchanged) and an explicit null/empty value (clear), hence the nested
/// `Option`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLinkRequest {
    /// Replacement target URL; unchanged when absent or empty
    #[validate(url(message = "Invalid URL format"))]
    pub original_url: Option<String>,

    /// Replacement description; explicit null clears it
    #[serde(default, deserialize_with = "explicit_null")]
    pub description: Option<Option<String>>,

    /// Replacement active flag
    pub is_active: Option<bool>,

    /// New link password; explicit empty or null removes protection, a
    /// non-empty value must meet the same minimum as on creation
    #[serde(default, deserialize_with = "explicit_null")]
    #[validate(custom(function = "validate_replacement_password"))]
    pub password: Option<Option<String>>,
}

/// Request body for verifying a protected link's password.
///
/// Both fields are optional at the serde level so that missing fields yield
/// the specific field-level messages instead of a body-parse error.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPasswordRequest {
    #[validate(required(message = "Short code is required"))]
    #[validate(length(min = 1, message = "Short code is required"))]
    pub short_code: Option<String>,

    #[validate(required(message = "Password is required"))]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: Option<String>,
}

/// Custom validator for short-code charset (letters, numbers, underscore, hyphen)
fn validate_code_charset(code: &str) -> Result<(), validator::ValidationError> {
    lazy_static::lazy_static! {
        static ref CODE_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
    }
    if CODE_REGEX.is_match(code) {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("charset");
        err.message =
            Some("Custom short code may only contain letters, numbers, underscore, hyphen".into());
        Err(err)
    }
}

/// Validator for a replacement link password: empty clears the protection
/// and is always allowed, anything else must be at least 6 characters
fn validate_replacement_password(password: &str) -> Result<(), validator::ValidationError> {
    if password.is_empty() || password.len() >= 6 {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("length");
        err.message = Some("Password must be at least 6 characters long".into());
        Err(err)
    }
}

/// Deserialize a field so that an absent key stays `None` while a present
/// key, including `null`, becomes `Some(..)`
fn explicit_null<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

// ============================================================================
// API Response DTOs
// ============================================================================

/// Generic success message response
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response for user registration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    /// The new account's ID
    pub user_id: i64,
}

/// Response for a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    /// Bearer token for subsequent requests
    pub token: String,
}

/// Response for a successfully created short link
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub message: String,
    /// The fully-qualified short URL (base + short code)
    pub short_url: String,
    /// The new record's ID
    pub id: i64,
}

/// A link as exposed to its owner or in the update response.
///
/// Derived `requiresPassword` stands in for the digest, which is never
/// serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub custom_short_code: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub requires_password: bool,
}

impl LinkResponse {
    pub fn from_link(link: Link) -> Self {
        Self {
            id: link.id,
            original_url: link.original_url,
            short_code: link.short_code,
            custom_short_code: link.custom_short_code,
            description: link.description,
            is_active: link.is_active,
            created_at: link.created_at,
            requires_password: link.password_hash.is_some(),
        }
    }
}

/// Response for updating a link
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLinkResponse {
    pub message: String,
    pub url: LinkResponse,
}

/// Public link details for the landing page.
///
/// `originalUrl` is present only when the link is unprotected; this is the
/// single place the target is exposed pre-authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDetailsResponse {
    pub requires_password: bool,
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
}

/// Response for a successful password verification
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPasswordResponse {
    pub original_url: String,
}

/// Generic API error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code (for programmatic handling)
    pub code: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}

/// A single field-level validation failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Response body for validation failures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten_request_validation() {
        let valid = ShortenRequest {
            original_url: "https://example.com".into(),
            custom_short_code: Some("my-code".into()),
            password: None,
            description: None,
            is_active: None,
        };
        assert!(valid.validate().is_ok());

        let bad_url = ShortenRequest {
            original_url: "not a url".into(),
            ..valid.clone()
        };
        assert!(bad_url.validate().is_err());

        let code_too_short = ShortenRequest {
            custom_short_code: Some("ab".into()),
            ..valid.clone()
        };
        assert!(code_too_short.validate().is_err());

        let code_too_long = ShortenRequest {
            custom_short_code: Some("elevenchars".into()),
            ..valid.clone()
        };
        assert!(code_too_long.validate().is_err());

        let bad_charset = ShortenRequest {
            custom_short_code: Some("bad code!".into()),
            ..valid.clone()
        };
        assert!(bad_charset.validate().is_err());

        let short_password = ShortenRequest {
            password: Some("pw".into()),
            ..valid
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_update_request_distinguishes_absent_and_null() {
        let absent: UpdateLinkRequest = serde_json::from_str("{}").unwrap();
        assert!(absent.description.is_none());
        assert!(absent.password.is_none());

        let null_fields: UpdateLinkRequest =
            serde_json::from_str(r#"{"description": null, "password": null}"#).unwrap();
        assert_eq!(null_fields.description, Some(None));
        assert_eq!(null_fields.password, Some(None));

        let set_fields: UpdateLinkRequest =
            serde_json::from_str(r#"{"description": "hi", "password": "secret1"}"#).unwrap();
        assert_eq!(set_fields.description, Some(Some("hi".into())));
        assert_eq!(set_fields.password, Some(Some("secret1".into())));
    }

    #[test]
    fn test_update_request_password_minimum_length() {
        // Replacement passwords follow the same minimum as on creation
        let too_short: UpdateLinkRequest = serde_json::from_str(r#"{"password": "x"}"#).unwrap();
        assert!(too_short.validate().is_err());

        let long_enough: UpdateLinkRequest =
            serde_json::from_str(r#"{"password": "secret1"}"#).unwrap();
        assert!(long_enough.validate().is_ok());

        // Clearing the password stays valid in both spellings
        let cleared: UpdateLinkRequest = serde_json::from_str(r#"{"password": ""}"#).unwrap();
        assert!(cleared.validate().is_ok());

        let nulled: UpdateLinkRequest = serde_json::from_str(r#"{"password": null}"#).unwrap();
        assert!(nulled.validate().is_ok());
    }

    #[test]
    fn test_verify_password_request_required_fields() {
        let empty: VerifyPasswordRequest = serde_json::from_str("{}").unwrap();
        let errors = empty.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("short_code"));
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_link_response_never_carries_digest() {
        let link = Link {
            id: 1,
            original_url: "https://example.com".into(),
            short_code: "abc1234".into(),
            custom_short_code: None,
            password_hash: Some("$2b$10$digest".into()),
            description: None,
            is_active: true,
            user_id: Some(1),
            created_at: "2024-01-01 00:00:00".into(),
        };
        let body = serde_json::to_string(&LinkResponse::from_link(link)).unwrap();
        assert!(!body.contains("digest"));
        assert!(body.contains("\"requiresPassword\":true"));
    }

    #[test]
    fn test_link_details_hides_url_when_protected() {
        let protected = LinkDetailsResponse {
            requires_password: true,
            description: Some("docs".into()),
            original_url: None,
        };
        let body = serde_json::to_string(&protected).unwrap();
        assert!(!body.contains("originalUrl"));

        let open = LinkDetailsResponse {
            requires_password: false,
            description: None,
            original_url: Some("https://example.com".into()),
        };
        let body = serde_json::to_string(&open).unwrap();
        assert!(body.contains("\"originalUrl\":\"https://example.com\""));
    }
}
