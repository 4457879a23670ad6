/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test database setup and cleanup
/// - Test user creation with a known password
/// - Session token issuance
/// - Request helpers

use taskdeck_api::app::{build_router, AppState};
use taskdeck_api::config::Config;
use taskdeck_shared::auth::password::hash_password;
use taskdeck_shared::models::session::Session;
use taskdeck_shared::models::task::{CreateTask, Task, TaskStatus};
use taskdeck_shared::models::user::{CreateUser, User};
use axum::body::Body;
use axum::http::Request;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

/// The password every test user is created with
pub const TEST_PASSWORD: &str = "pw123456";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub user: User,
    pub token: String,
}

impl TestContext {
    /// Creates a new test context with a fresh user and session
    pub async fn new() -> anyhow::Result<Self> {
        // Load test configuration
        let config = Config::from_env()?;

        // Connect to database
        let db = PgPool::connect(&config.database.url).await?;

        // Run migrations (path relative to Cargo.toml, not this file)
        sqlx::migrate!("../migrations").run(&db).await?;

        // Create test user with a real password hash
        let (user, token) = create_user_with_session(&db, "Test User").await?;

        // Build app
        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext {
            db,
            app,
            user,
            token,
        })
    }

    /// Cleans up test data
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        // Delete test user (cascades to sessions and tasks)
        User::delete(&self.db, self.user.id).await?;
        Ok(())
    }
}

/// Creates a user with a hashed password and an active session
///
/// Returns the user and the plaintext session token.
pub async fn create_user_with_session(
    db: &PgPool,
    name: &str,
) -> anyhow::Result<(User, String)> {
    let user = User::create(
        db,
        CreateUser {
            name: name.to_string(),
            email: format!("test-{}@example.com", Uuid::new_v4()),
            password_hash: hash_password(TEST_PASSWORD)?,
        },
    )
    .await?;

    let (_session, token) = Session::create(db, user.id).await?;

    Ok((user, token))
}

/// Helper to create a task directly in the store
pub async fn create_test_task(
    ctx: &TestContext,
    title: &str,
    status: TaskStatus,
    due_date: Option<NaiveDate>,
) -> anyhow::Result<Task> {
    let task = Task::create(
        &ctx.db,
        CreateTask {
            user_id: ctx.user.id,
            title: title.to_string(),
            description: None,
            status,
            due_date,
        },
    )
    .await?;

    Ok(task)
}

/// Builds a JSON request with an optional bearer token
pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Reads a response body as JSON
pub async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
