//! Application-wide constants.
//!
//! Centralizes magic numbers and strings for better maintainability.

// ============================================================================
// Short Code Constants
// ============================================================================

/// Characters used for generating short codes (lowercase alphanumerics only,
/// so generated codes survive case-folding proxies)
pub const SHORT_CODE_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Length of generated short codes (36^7 combinations)
pub const SHORT_CODE_LENGTH: usize = 7;

// ============================================================================
// Credential Constants
// ============================================================================

/// bcrypt work factor for account and link passwords
pub const BCRYPT_COST: u32 = 10;

/// Lifetime of issued bearer tokens in seconds (1 hour)
pub const TOKEN_TTL_SECS: i64 = 3600;

// ============================================================================
// Rate Limit Constants
// ============================================================================

/// Seconds between replenished cells for the shorten endpoint
/// (10 requests per 15 minutes)
pub const SHORTEN_REPLENISH_SECS: u64 = 90;

/// Burst size for the shorten endpoint
pub const SHORTEN_BURST_SIZE: u32 = 10;

/// Seconds between replenished cells for the verify-password endpoint
/// (5 requests per 15 minutes)
pub const VERIFY_PASSWORD_REPLENISH_SECS: u64 = 180;

/// Burst size for the verify-password endpoint
pub const VERIFY_PASSWORD_BURST_SIZE: u32 = 5;
