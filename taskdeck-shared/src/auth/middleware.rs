/// Authentication middleware for Axum
///
/// This module provides middleware for bearer-token authentication. The
/// middleware extracts the token from the `Authorization: Bearer <token>`
/// header, resolves it against the session store, and adds an authentication
/// context to the request extensions.
///
/// # Request Extensions
///
/// After successful authentication, middleware adds:
/// - `AuthContext`: contains the resolved user_id and session_id
///
/// # Example
///
/// ```no_run
/// use axum::{Router, routing::get, middleware, Extension};
/// use taskdeck_shared::auth::middleware::{session_auth_middleware, AuthContext};
/// use sqlx::PgPool;
///
/// async fn protected_handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Hello, user {}!", auth.user_id)
/// }
///
/// fn routes(pool: PgPool) -> Router {
///     Router::new()
///         .route("/tasks", get(protected_handler))
///         .layer(middleware::from_fn(move |req, next| {
///             session_auth_middleware(pool.clone(), req, next)
///         }))
/// }
/// ```

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::token::validate_token_format;
use crate::models::session::Session;

/// Authentication context added to request extensions
///
/// This struct is added to the request after successful authentication.
/// Handlers can extract it using Axum's `Extension` extractor.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use taskdeck_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("User: {}", auth.user_id)
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Uuid,

    /// Session that authenticated this request
    pub session_id: Uuid,
}

impl AuthContext {
    /// Creates auth context from a resolved session
    pub fn from_session(session: &Session) -> Self {
        Self {
            user_id: session.user_id,
            session_id: session.id,
        }
    }
}

/// Error type for authentication middleware
#[derive(Debug)]
pub enum AuthError {
    /// Missing authorization header
    MissingCredentials,

    /// Invalid authorization header format
    InvalidFormat(String),

    /// Token is unknown or its session was revoked
    InvalidToken(String),

    /// Database error
    DatabaseError(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingCredentials => {
                (StatusCode::UNAUTHORIZED, "Missing credentials").into_response()
            }
            AuthError::InvalidFormat(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AuthError::InvalidToken(msg) => (StatusCode::UNAUTHORIZED, msg).into_response(),
            AuthError::DatabaseError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

/// Bearer-token authentication middleware
///
/// Validates session tokens from the `Authorization: Bearer <token>` header
/// against the session store, then injects `AuthContext` into request
/// extensions.
///
/// # Errors
///
/// Returns 401 Unauthorized if:
/// - Authorization header is missing
/// - Token is unknown or its session has been revoked
///
/// Returns 400 Bad Request if the header is not a well-formed bearer token.
pub async fn session_auth_middleware(
    pool: PgPool,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    // Extract Authorization header
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    // Parse Bearer token
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    // Cheap format check before touching the database
    if !validate_token_format(token) {
        return Err(AuthError::InvalidToken("Invalid session token".to_string()));
    }

    // Resolve token against the session store
    let session = Session::resolve(&pool, token)
        .await
        .map_err(|e| AuthError::DatabaseError(format!("Database error: {}", e)))?
        .ok_or_else(|| AuthError::InvalidToken("Invalid or revoked session token".to_string()))?;

    // Add auth context to request extensions
    let auth_context = AuthContext::from_session(&session);
    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}
