/// Authentication endpoints
///
/// This module provides user authentication endpoints:
/// - Registration
/// - Login (issues an opaque session token)
/// - Logout (revokes the presented session)
///
/// # Endpoints
///
/// - `POST /register` - Register new user
/// - `POST /login` - Login and get a session token
/// - `POST /logout` - Revoke the current session

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Extension, Json};
use taskdeck_shared::{
    auth::{middleware::AuthContext, password},
    models::{
        session::Session,
        user::{CreateUser, User},
    },
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name
    #[validate(length(min = 1, max = 255, message = "The name must be between 1 and 255 characters."))]
    pub name: String,

    /// Email address
    #[validate(
        email(message = "Please provide a valid email address."),
        length(max = 255, message = "The email may not be greater than 255 characters.")
    )]
    pub email: String,

    /// Password
    #[validate(length(min = 8, message = "The password must be at least 8 characters long."))]
    pub password: String,

    /// Password confirmation, must match `password`
    #[validate(must_match(other = "password", message = "Password confirmation does not match."))]
    pub password_confirmation: String,
}

/// Public view of a user returned by auth endpoints
#[derive(Debug, Serialize)]
pub struct UserSummary {
    /// User ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,
}

/// Register response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// Always true on success
    pub status: bool,

    /// Human-readable message
    pub message: String,

    /// The created user (never includes the password hash)
    pub user: UserSummary,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Please provide a valid email address."))]
    pub email: String,

    /// Password
    #[validate(length(min = 1, message = "The password field is required."))]
    pub password: String,
}

/// User payload returned on login; includes the account role
#[derive(Debug, Serialize)]
pub struct LoginUser {
    /// User ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Account role (defaults to "user")
    pub role: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Always true on success
    pub status: bool,

    /// Human-readable message
    pub message: String,

    /// The session token; shown exactly once
    pub token: String,

    /// The authenticated user
    pub user: LoginUser,
}

/// Logout response
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    /// Human-readable message
    pub message: String,
}

/// Register a new user
///
/// Creates a new user account. The password is hashed with Argon2id before it
/// touches the database; the response never contains the password or its hash.
///
/// # Endpoint
///
/// ```text
/// POST /register
/// Content-Type: application/json
///
/// {
///   "name": "Jane Doe",
///   "email": "user@example.com",
///   "password": "pw123456",
///   "password_confirmation": "pw123456"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": true,
///   "message": "User registered successfully",
///   "user": { "id": "uuid", "name": "Jane Doe", "email": "user@example.com" }
/// }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed (per-field details)
/// - `409 Conflict`: Email already exists
/// - `500 Internal Server Error`: Server error
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<RegisterResponse>> {
    // Validate request
    req.validate()?;

    // Hash password
    let password_hash = password::hash_password(&req.password)?;

    // Create user; a duplicate email surfaces as a unique-constraint conflict
    let user = User::create(
        &state.db,
        CreateUser {
            name: req.name,
            email: req.email,
            password_hash,
        },
    )
    .await?;

    Ok(Json(RegisterResponse {
        status: true,
        message: "User registered successfully".to_string(),
        user: UserSummary {
            id: user.id,
            name: user.name,
            email: user.email,
        },
    }))
}

/// Login endpoint
///
/// Authenticates a user and issues a fresh opaque session token. Each login
/// creates a new session; concurrent sessions are allowed.
///
/// Unknown email and wrong password are deliberately indistinguishable in the
/// response, to avoid account enumeration.
///
/// # Endpoint
///
/// ```text
/// POST /login
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "pw123456"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": true,
///   "message": "Login successful",
///   "token": "deck_abcdef123456...",
///   "user": { "id": "uuid", "name": "Jane Doe", "email": "user@example.com", "role": "user" }
/// }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed
/// - `401 Unauthorized`: Invalid credentials
/// - `500 Internal Server Error`: Server error
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    // Validate request
    req.validate()?;

    // Find user by email (case-insensitive)
    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    // Verify password
    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    // Issue a session; the plaintext token is returned exactly once
    let (_session, token) = Session::create(&state.db, user.id).await?;

    Ok(Json(LoginResponse {
        status: true,
        message: "Login successful".to_string(),
        token,
        user: LoginUser {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        },
    }))
}

/// Logout endpoint
///
/// Revokes the session that authenticated this request. Revocation is
/// idempotent at the store layer: a session that was already revoked between
/// authentication and execution still yields a successful logout.
///
/// # Endpoint
///
/// ```text
/// POST /logout
/// Authorization: Bearer <token>
/// ```
///
/// # Response
///
/// ```json
/// { "message": "Logged out successfully" }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing, unknown, or already-revoked token
/// - `500 Internal Server Error`: Server error
pub async fn logout(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<LogoutResponse>> {
    Session::revoke(&state.db, auth.session_id).await?;

    Ok(Json(LogoutResponse {
        message: "Logged out successfully".to_string(),
    }))
}
