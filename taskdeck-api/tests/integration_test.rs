/// Integration tests for the Taskdeck API
///
/// These tests verify the full system works end-to-end:
/// - Registration and login with hashed credentials
/// - Session issuance and revocation
/// - Task CRUD with the ownership guard
/// - Owner-scoped listing and ordering
///
/// They require a running PostgreSQL database; set DATABASE_URL before
/// running.

mod common;

use axum::http::StatusCode;
use chrono::NaiveDate;
use common::TestContext;
use serde_json::json;
use taskdeck_shared::models::task::{Task, TaskStatus};
use taskdeck_shared::models::user::User;
use tower::Service as _;

/// Registration creates exactly one user and never returns the password
#[tokio::test]
async fn test_register_creates_user() {
    let ctx = TestContext::new().await.unwrap();

    let email = format!("alice-{}@example.com", uuid::Uuid::new_v4());
    let request = common::json_request(
        "POST",
        "/register",
        None,
        Some(json!({
            "name": "Alice",
            "email": email,
            "password": "pw123456",
            "password_confirmation": "pw123456"
        })),
    );

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::response_json(response).await;
    assert_eq!(body["status"], true);
    assert_eq!(body["user"]["email"], email);
    assert_eq!(body["user"]["name"], "Alice");

    // The password and its hash must never appear in the response
    let raw = body.to_string();
    assert!(!raw.contains("password"));
    assert!(!raw.contains("argon2"));

    // Exactly one user exists for that email
    let user = User::find_by_email(&ctx.db, &email).await.unwrap();
    assert!(user.is_some());

    // Cleanup the registered user too
    User::delete(&ctx.db, user.unwrap().id).await.unwrap();
    ctx.cleanup().await.unwrap();
}

/// Registering the same email twice fails with a conflict
#[tokio::test]
async fn test_register_duplicate_email() {
    let ctx = TestContext::new().await.unwrap();

    let request = common::json_request(
        "POST",
        "/register",
        None,
        Some(json!({
            "name": "Someone Else",
            "email": ctx.user.email,
            "password": "pw123456",
            "password_confirmation": "pw123456"
        })),
    );

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    ctx.cleanup().await.unwrap();
}

/// Mismatched password confirmation is a field-level validation error
#[tokio::test]
async fn test_register_validation_error() {
    let ctx = TestContext::new().await.unwrap();

    let request = common::json_request(
        "POST",
        "/register",
        None,
        Some(json!({
            "name": "Alice",
            "email": format!("alice-{}@example.com", uuid::Uuid::new_v4()),
            "password": "pw123456",
            "password_confirmation": "different"
        })),
    );

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = common::response_json(response).await;
    assert_eq!(body["error"], "validation_error");
    let details = body["details"].as_array().unwrap();
    assert!(details
        .iter()
        .any(|d| d["field"] == "password_confirmation"));

    ctx.cleanup().await.unwrap();
}

/// Login succeeds iff the stored hash verifies against the password, and the
/// failure message never reveals whether the email exists
#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let ctx = TestContext::new().await.unwrap();

    // Wrong password for a known email
    let request = common::json_request(
        "POST",
        "/login",
        None,
        Some(json!({ "email": ctx.user.email, "password": "wrong-password" })),
    );
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let wrong_password_body = common::response_json(response).await;

    // Unknown email entirely
    let request = common::json_request(
        "POST",
        "/login",
        None,
        Some(json!({ "email": "nobody@example.com", "password": "wrong-password" })),
    );
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let unknown_email_body = common::response_json(response).await;

    // Same message either way, so callers can't enumerate accounts
    assert_eq!(
        wrong_password_body["message"],
        unknown_email_body["message"]
    );

    ctx.cleanup().await.unwrap();
}

/// Successful login issues a fresh opaque token bound to the user
#[tokio::test]
async fn test_login_success_issues_token() {
    let ctx = TestContext::new().await.unwrap();

    let request = common::json_request(
        "POST",
        "/login",
        None,
        Some(json!({ "email": ctx.user.email, "password": common::TEST_PASSWORD })),
    );

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::response_json(response).await;
    assert_eq!(body["status"], true);
    assert_eq!(body["user"]["id"], ctx.user.id.to_string());
    assert_eq!(body["user"]["role"], "user");

    let token = body["token"].as_str().unwrap();
    assert!(token.starts_with("deck_"));
    assert_eq!(token.len(), 37);

    // The new token authenticates requests
    let request = common::json_request("GET", "/tasks", Some(token), None);
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    ctx.cleanup().await.unwrap();
}

/// Creating a task sets the authenticated caller as owner
#[tokio::test]
async fn test_create_task() {
    let ctx = TestContext::new().await.unwrap();

    let request = common::json_request(
        "POST",
        "/tasks",
        Some(&ctx.token),
        Some(json!({
            "title": "T1",
            "description": "first task",
            "status": "pending",
            "due_date": "2025-03-01"
        })),
    );

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = common::response_json(response).await;
    assert_eq!(body["title"], "T1");
    assert_eq!(body["description"], "first task");
    assert_eq!(body["status"], "pending");
    assert_eq!(body["due_date"], "2025-03-01");
    assert_eq!(body["user_id"], ctx.user.id.to_string());

    ctx.cleanup().await.unwrap();
}

/// Round-trip: creating a task then fetching it returns the same fields
#[tokio::test]
async fn test_task_roundtrip() {
    let ctx = TestContext::new().await.unwrap();

    let request = common::json_request(
        "POST",
        "/tasks",
        Some(&ctx.token),
        Some(json!({
            "title": "Round trip",
            "status": "in progress",
            "due_date": "2025-06-15"
        })),
    );
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = common::response_json(response).await;

    let task_id = created["id"].as_str().unwrap();
    let request = common::json_request(
        "GET",
        &format!("/tasks/{}", task_id),
        Some(&ctx.token),
        None,
    );
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = common::response_json(response).await;

    assert_eq!(fetched["id"], created["id"]);
    assert_eq!(fetched["title"], "Round trip");
    assert_eq!(fetched["status"], "in progress");
    assert_eq!(fetched["due_date"], "2025-06-15");
    assert_eq!(fetched["description"], serde_json::Value::Null);

    ctx.cleanup().await.unwrap();
}

/// Non-owners get a forbidden outcome and never mutate the task
#[tokio::test]
async fn test_task_forbidden_for_non_owner() {
    let ctx = TestContext::new().await.unwrap();

    // Alice's task
    let task = common::create_test_task(&ctx, "Alice's task", TaskStatus::Pending, None)
        .await
        .unwrap();

    // Bob is a different user with a valid session
    let (bob, bob_token) = common::create_user_with_session(&ctx.db, "Bob")
        .await
        .unwrap();

    for (method, body) in [
        ("GET", None),
        ("PUT", Some(json!({ "title": "stolen" }))),
        ("PATCH", Some(json!({ "status": "completed" }))),
        ("DELETE", None),
    ] {
        let request = common::json_request(
            method,
            &format!("/tasks/{}", task.id),
            Some(&bob_token),
            body,
        );
        let response = ctx.app.clone().call(request).await.unwrap();
        assert_eq!(
            response.status(),
            StatusCode::FORBIDDEN,
            "{} by a non-owner should be forbidden",
            method
        );
    }

    // The task is unchanged and still present
    let unchanged = Task::find_by_id(&ctx.db, task.id).await.unwrap().unwrap();
    assert_eq!(unchanged.title, "Alice's task");
    assert_eq!(unchanged.status, TaskStatus::Pending);
    assert_eq!(Task::count_by_owner(&ctx.db, ctx.user.id).await.unwrap(), 1);

    User::delete(&ctx.db, bob.id).await.unwrap();
    ctx.cleanup().await.unwrap();
}

/// Listing returns only the caller's tasks, due date ascending, nulls last
#[tokio::test]
async fn test_list_tasks_scoped_and_ordered() {
    let ctx = TestContext::new().await.unwrap();

    let later = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
    let sooner = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

    common::create_test_task(&ctx, "later", TaskStatus::Pending, Some(later))
        .await
        .unwrap();
    common::create_test_task(&ctx, "no due date", TaskStatus::Pending, None)
        .await
        .unwrap();
    common::create_test_task(&ctx, "sooner", TaskStatus::Pending, Some(sooner))
        .await
        .unwrap();

    // Another user's task must never appear in the listing
    let (bob, _bob_token) = common::create_user_with_session(&ctx.db, "Bob")
        .await
        .unwrap();
    Task::create(
        &ctx.db,
        taskdeck_shared::models::task::CreateTask {
            user_id: bob.id,
            title: "Bob's task".to_string(),
            description: None,
            status: TaskStatus::Pending,
            due_date: Some(sooner),
        },
    )
    .await
    .unwrap();

    let request = common::json_request("GET", "/tasks", Some(&ctx.token), None);
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::response_json(response).await;
    let tasks = body.as_array().unwrap();
    assert_eq!(tasks.len(), 3);

    let titles: Vec<&str> = tasks.iter().map(|t| t["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["sooner", "later", "no due date"]);

    for task in tasks {
        assert_eq!(task["user_id"], ctx.user.id.to_string());
    }

    User::delete(&ctx.db, bob.id).await.unwrap();
    ctx.cleanup().await.unwrap();
}

/// Updating only the status leaves every other field unchanged
#[tokio::test]
async fn test_partial_update_preserves_fields() {
    let ctx = TestContext::new().await.unwrap();

    let due = NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();
    let task = Task::create(
        &ctx.db,
        taskdeck_shared::models::task::CreateTask {
            user_id: ctx.user.id,
            title: "Keep me".to_string(),
            description: Some("original description".to_string()),
            status: TaskStatus::Pending,
            due_date: Some(due),
        },
    )
    .await
    .unwrap();

    let request = common::json_request(
        "PATCH",
        &format!("/tasks/{}", task.id),
        Some(&ctx.token),
        Some(json!({ "status": "completed" })),
    );
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::response_json(response).await;
    assert_eq!(body["status"], "completed");
    assert_eq!(body["title"], "Keep me");
    assert_eq!(body["description"], "original description");
    assert_eq!(body["due_date"], "2025-05-20");

    ctx.cleanup().await.unwrap();
}

/// An explicit null clears a nullable field; omitting it leaves it alone
#[tokio::test]
async fn test_update_clears_nullable_field() {
    let ctx = TestContext::new().await.unwrap();

    let due = NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();
    let task = common::create_test_task(&ctx, "Clear my date", TaskStatus::Pending, Some(due))
        .await
        .unwrap();

    let request = common::json_request(
        "PATCH",
        &format!("/tasks/{}", task.id),
        Some(&ctx.token),
        Some(json!({ "due_date": null })),
    );
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::response_json(response).await;
    assert_eq!(body["due_date"], serde_json::Value::Null);
    assert_eq!(body["title"], "Clear my date");

    ctx.cleanup().await.unwrap();
}

/// Empty and oversized titles are field-level validation errors
#[tokio::test]
async fn test_create_task_title_validation() {
    let ctx = TestContext::new().await.unwrap();

    for bad_title in ["", &"x".repeat(256)] {
        let request = common::json_request(
            "POST",
            "/tasks",
            Some(&ctx.token),
            Some(json!({ "title": bad_title, "status": "pending" })),
        );
        let response = ctx.app.clone().call(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    ctx.cleanup().await.unwrap();
}

/// Requests without a token are rejected before reaching any handler
#[tokio::test]
async fn test_authentication_required() {
    let ctx = TestContext::new().await.unwrap();

    let request = common::json_request("GET", "/tasks", None, None);
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let request = common::json_request(
        "POST",
        "/tasks",
        None,
        Some(json!({ "title": "T", "status": "pending" })),
    );
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    ctx.cleanup().await.unwrap();
}

/// Unknown task ids are a not-found, distinct from the forbidden outcome
#[tokio::test]
async fn test_unknown_task_not_found() {
    let ctx = TestContext::new().await.unwrap();

    let request = common::json_request(
        "GET",
        &format!("/tasks/{}", uuid::Uuid::new_v4()),
        Some(&ctx.token),
        None,
    );
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    ctx.cleanup().await.unwrap();
}

/// Logout revokes the session; the token stops resolving immediately
#[tokio::test]
async fn test_logout_revokes_session() {
    let ctx = TestContext::new().await.unwrap();

    let request = common::json_request("POST", "/logout", Some(&ctx.token), None);
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::response_json(response).await;
    assert_eq!(body["message"], "Logged out successfully");

    // The revoked token no longer authenticates anything
    let request = common::json_request("GET", "/tasks", Some(&ctx.token), None);
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // A second logout with the same token fails authentication, not the server
    let request = common::json_request("POST", "/logout", Some(&ctx.token), None);
    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    ctx.cleanup().await.unwrap();
}
