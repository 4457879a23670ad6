/// Session model and database operations
///
/// This module provides the Session model backing opaque bearer tokens. A
/// session row is created on login, consulted on every authenticated request,
/// and revoked on logout. Users may hold any number of concurrent sessions.
///
/// # Security
///
/// - Tokens are stored as SHA-256 hashes (never plaintext)
/// - Tokens are prefixed with "deck_" for identification
/// - The full token is only returned on creation (never again)
/// - Sessions can be revoked; revocation is idempotent
///
/// # Schema
///
/// ```sql
/// CREATE TABLE sessions (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     token_prefix VARCHAR(10) NOT NULL,
///     token_hash VARCHAR(64) NOT NULL UNIQUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     last_used_at TIMESTAMPTZ,
///     revoked BOOLEAN NOT NULL DEFAULT FALSE,
///     revoked_at TIMESTAMPTZ
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::models::session::Session;
/// use taskdeck_shared::db::pool::{create_pool, DatabaseConfig};
/// use uuid::Uuid;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
/// let user_id = Uuid::new_v4();
///
/// // Issue a session for a freshly authenticated user
/// let (session, plaintext_token) = Session::create(&pool, user_id).await?;
///
/// // IMPORTANT: hand plaintext_token to the caller now - it's never shown again!
/// println!("Bearer token: {}", plaintext_token);
///
/// // Later, resolve a presented token back to its session
/// let resolved = Session::resolve(&pool, &plaintext_token).await?;
/// assert!(resolved.is_some());
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::token;

/// Session model representing one issued bearer token
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
    /// Unique session ID
    pub id: Uuid,

    /// User this session belongs to
    pub user_id: Uuid,

    /// First 10 characters of the token (for display: "deck_abc12...")
    pub token_prefix: String,

    /// SHA-256 hash of the full token (never store plaintext!)
    pub token_hash: String,

    /// When the session was created
    pub created_at: DateTime<Utc>,

    /// When the token was last presented
    pub last_used_at: Option<DateTime<Utc>>,

    /// Whether the session has been revoked
    pub revoked: bool,

    /// When the session was revoked (if applicable)
    pub revoked_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Extracts the display prefix from a token (first 10 chars)
    ///
    /// # Example
    ///
    /// ```
    /// use taskdeck_shared::models::session::Session;
    ///
    /// let token = "deck_abc123xyz";
    /// let prefix = Session::extract_prefix(token);
    /// assert_eq!(prefix, "deck_abc12");
    /// ```
    pub fn extract_prefix(token: &str) -> String {
        token.chars().take(10).collect()
    }

    /// Creates a new session for a user
    ///
    /// Generates a fresh random token, stores its hash, and returns both the
    /// database record and the plaintext token.
    /// **IMPORTANT**: The plaintext token is only returned once and never stored!
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `user_id` - User the session belongs to
    ///
    /// # Returns
    ///
    /// Tuple of (Session record, plaintext token string)
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn create(pool: &PgPool, user_id: Uuid) -> Result<(Self, String), sqlx::Error> {
        let (plaintext_token, token_hash) = token::generate_token();
        let token_prefix = Self::extract_prefix(&plaintext_token);

        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (user_id, token_prefix, token_hash)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, token_prefix, token_hash, created_at,
                      last_used_at, revoked, revoked_at
            "#,
        )
        .bind(user_id)
        .bind(token_prefix)
        .bind(token_hash)
        .fetch_one(pool)
        .await?;

        Ok((session, plaintext_token))
    }

    /// Finds a session by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT id, user_id, token_prefix, token_hash, created_at,
                   last_used_at, revoked, revoked_at
            FROM sessions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(session)
    }

    /// Resolves a presented token to its active session
    ///
    /// Hashes the presented value and looks up an unrevoked session.
    /// Also bumps `last_used_at` when a match is found.
    ///
    /// Returns `None` if the token is unknown or the session is revoked.
    pub async fn resolve(pool: &PgPool, plaintext_token: &str) -> Result<Option<Self>, sqlx::Error> {
        let token_hash = token::hash_token(plaintext_token);

        let session = sqlx::query_as::<_, Session>(
            r#"
            UPDATE sessions
            SET last_used_at = NOW()
            WHERE token_hash = $1
              AND revoked = FALSE
            RETURNING id, user_id, token_prefix, token_hash, created_at,
                      last_used_at, revoked, revoked_at
            "#,
        )
        .bind(token_hash)
        .fetch_optional(pool)
        .await?;

        Ok(session)
    }

    /// Revokes a session
    ///
    /// Idempotent: revoking an already-revoked or unknown session is not an
    /// error. Returns true if a live session was revoked by this call.
    pub async fn revoke(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE sessions
            SET revoked = TRUE, revoked_at = NOW()
            WHERE id = $1 AND revoked = FALSE
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists all sessions for a user, newest first
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let sessions = sqlx::query_as::<_, Session>(
            r#"
            SELECT id, user_id, token_prefix, token_hash, created_at,
                   last_used_at, revoked, revoked_at
            FROM sessions
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(sessions)
    }
}
