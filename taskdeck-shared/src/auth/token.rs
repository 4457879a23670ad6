/// Session token utilities
///
/// This module provides utilities for generating and validating opaque session
/// tokens. These work in conjunction with the `models::session` module for
/// database operations.
///
/// # Security
///
/// - **Format**: `deck_{32_chars}` (prefix + 32 random alphanumeric chars)
/// - **Storage**: Tokens are hashed with SHA-256 before storage; the raw token
///   is returned to the caller exactly once at login and never persisted
/// - **Validation**: Constant-time comparison to prevent timing attacks
///
/// # Token Format
///
/// Session tokens follow the pattern: `deck_abcd1234efgh5678...` (37 chars total)
/// - Prefix: "deck_" (5 chars)
/// - Random part: 32 alphanumeric chars (base62: [A-Za-z0-9])
///
/// # Example
///
/// ```
/// use taskdeck_shared::auth::token::{generate_token, hash_token, validate_token_format};
///
/// // Generate a new session token
/// let (token, hash) = generate_token();
/// assert!(token.starts_with("deck_"));
/// assert_eq!(token.len(), 37);
///
/// // Validate format
/// assert!(validate_token_format(&token));
///
/// // Hash matches
/// let computed_hash = hash_token(&token);
/// assert_eq!(hash, computed_hash);
/// ```

use rand::Rng;
use sha2::{Digest, Sha256};

/// Length of the random part of the token (characters)
const TOKEN_RANDOM_LENGTH: usize = 32;

/// Session token prefix
const TOKEN_PREFIX: &str = "deck_";

/// Total length of a session token (prefix + random)
pub const SESSION_TOKEN_LENGTH: usize = TOKEN_PREFIX.len() + TOKEN_RANDOM_LENGTH;

/// Generates a new session token
///
/// Creates a cryptographically random token with the format `deck_{32_chars}`.
/// Also returns the SHA-256 hash for database storage.
///
/// # Returns
///
/// Tuple of (plaintext_token, sha256_hash)
///
/// # Security
///
/// - Uses `rand::thread_rng()` for cryptographic randomness
/// - Token space: 62^32 ≈ 2^190 combinations
/// - Hash prevents plaintext storage
pub fn generate_token() -> (String, String) {
    let random_part = generate_random_string(TOKEN_RANDOM_LENGTH);
    let token = format!("{}{}", TOKEN_PREFIX, random_part);
    let hash = hash_token(&token);

    (token, hash)
}

/// Generates a random alphanumeric string
///
/// Uses base62 encoding (A-Z, a-z, 0-9) so tokens are header-safe.
fn generate_random_string(length: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();

    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Hashes a session token using SHA-256
///
/// # Arguments
///
/// * `token` - Plaintext session token
///
/// # Returns
///
/// Hex-encoded SHA-256 hash (64 characters)
///
/// # Example
///
/// ```
/// use taskdeck_shared::auth::token::hash_token;
///
/// let hash = hash_token("deck_test123");
/// assert_eq!(hash.len(), 64);
///
/// // Same input = same hash (deterministic)
/// let hash2 = hash_token("deck_test123");
/// assert_eq!(hash, hash2);
/// ```
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Validates session token format
///
/// Checks that the token:
/// - Starts with "deck_"
/// - Has correct length (37 chars)
/// - Contains only alphanumeric characters after the prefix
///
/// # Example
///
/// ```
/// use taskdeck_shared::auth::token::validate_token_format;
///
/// // Valid
/// assert!(validate_token_format("deck_abcdefghijklmnopqrstuvwxyz123456"));
///
/// // Invalid - wrong prefix
/// assert!(!validate_token_format("wrong_abcdefghijklmnopqrstuvwxyz123456"));
///
/// // Invalid - too short
/// assert!(!validate_token_format("deck_short"));
/// ```
pub fn validate_token_format(token: &str) -> bool {
    // Check length
    if token.len() != SESSION_TOKEN_LENGTH {
        return false;
    }

    // Check prefix
    if !token.starts_with(TOKEN_PREFIX) {
        return false;
    }

    // Check random part is alphanumeric
    let random_part = &token[TOKEN_PREFIX.len()..];
    random_part.chars().all(|c| c.is_alphanumeric())
}

/// Validates a session token against a stored hash
///
/// Uses constant-time comparison to prevent timing attacks.
///
/// # Arguments
///
/// * `token` - Plaintext session token
/// * `stored_hash` - SHA-256 hash from the database
///
/// # Example
///
/// ```
/// use taskdeck_shared::auth::token::{generate_token, verify_token};
///
/// let (token, hash) = generate_token();
///
/// // Correct token
/// assert!(verify_token(&token, &hash));
///
/// // Wrong token
/// assert!(!verify_token("deck_wrongtoken123", &hash));
/// ```
pub fn verify_token(token: &str, stored_hash: &str) -> bool {
    let computed_hash = hash_token(token);
    constant_time_compare(&computed_hash, stored_hash)
}

/// Constant-time string comparison
///
/// Prevents timing attacks by ensuring comparison always takes the same
/// amount of time regardless of where strings differ.
///
/// # Example
///
/// ```
/// use taskdeck_shared::auth::token::constant_time_compare;
///
/// assert!(constant_time_compare("hello", "hello"));
/// assert!(!constant_time_compare("hello", "world"));
/// ```
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    // XOR all bytes and accumulate
    let mut result = 0u8;
    for i in 0..a_bytes.len() {
        result |= a_bytes[i] ^ b_bytes[i];
    }

    result == 0
}
