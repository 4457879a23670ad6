/// Authentication and authorization utilities
///
/// This module provides the authentication primitives for Taskdeck:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`token`]: opaque session token generation and validation
/// - [`middleware`]: bearer-token authentication middleware for Axum
/// - [`authorization`]: task-ownership access guard
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **Session Tokens**: Secure random generation with SHA-256 hashing;
///   the raw token is handed out once and never persisted
/// - **Constant-time Comparison**: All verification uses constant-time
///   operations
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::auth::password::{hash_password, verify_password};
/// use taskdeck_shared::auth::token::generate_token;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Password authentication
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// // Session token issuance
/// let (token, token_hash) = generate_token();
/// assert!(token.starts_with("deck_"));
/// # Ok(())
/// # }
/// ```

pub mod password;
pub mod token;
pub mod middleware;
pub mod authorization;
