/// Task CRUD endpoints
///
/// This module provides the per-user task endpoints. Every route requires a
/// valid session token; routes addressing a specific task additionally run
/// the ownership guard before reading or writing anything.
///
/// # Endpoints
///
/// - `GET /tasks` - List the caller's tasks, soonest due date first
/// - `POST /tasks` - Create a task owned by the caller
/// - `GET /tasks/:id` - Fetch one task (owner only)
/// - `PUT /tasks/:id` / `PATCH /tasks/:id` - Partial update (owner only)
/// - `DELETE /tasks/:id` - Delete (owner only)
///
/// # Ownership
///
/// The owner is always taken from the authenticated session, never from the
/// request body; there is no way for a caller to create or move a task into
/// another user's list. Field updates go through typed request structs, so
/// unknown or privileged fields (like `user_id`) are ignored rather than
/// mass-assigned.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use taskdeck_shared::{
    auth::{authorization::authorize_task_access, middleware::AuthContext},
    models::task::{CreateTask, Task, TaskStatus, UpdateTask},
};
use uuid::Uuid;
use validator::Validate;

/// Create task request
///
/// `status` and `due_date` are typed, so an unknown status word or a
/// malformed date is rejected before the handler runs.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(min = 1, max = 255, message = "The title must be between 1 and 255 characters."))]
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Initial status
    pub status: TaskStatus,

    /// Optional due date (YYYY-MM-DD)
    pub due_date: Option<NaiveDate>,
}

/// Update task request
///
/// Every field is optional; only fields present in the body are validated and
/// written. For nullable columns an explicit JSON `null` clears the value,
/// while omitting the field leaves it unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    /// New title
    #[validate(length(min = 1, max = 255, message = "The title must be between 1 and 255 characters."))]
    pub title: Option<String>,

    /// New description; null clears it
    #[serde(default, deserialize_with = "deserialize_present")]
    pub description: Option<Option<String>>,

    /// New status
    pub status: Option<TaskStatus>,

    /// New due date; null clears it
    #[serde(default, deserialize_with = "deserialize_present")]
    pub due_date: Option<Option<NaiveDate>>,
}

/// Deserializes a field that was present in the body, keeping JSON `null`
/// distinct from an absent field (absent hits `#[serde(default)]` instead).
fn deserialize_present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

/// Delete task response
#[derive(Debug, serde::Serialize)]
pub struct DeleteTaskResponse {
    /// Human-readable message
    pub message: String,
}

/// List the caller's tasks
///
/// Returns only tasks owned by the authenticated user, filtered at the query
/// level. Ordered by due date ascending; tasks without a due date come last.
///
/// # Endpoint
///
/// ```text
/// GET /tasks
/// Authorization: Bearer <token>
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid session token
/// - `500 Internal Server Error`: Server error
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks = Task::list_by_owner(&state.db, auth.user_id).await?;

    Ok(Json(tasks))
}

/// Create a task
///
/// The new task is owned by the authenticated caller.
///
/// # Endpoint
///
/// ```text
/// POST /tasks
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// {
///   "title": "Write report",
///   "description": "Q3 numbers",
///   "status": "pending",
///   "due_date": "2025-03-01"
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid session token
/// - `422 Unprocessable Entity`: Validation failed
/// - `500 Internal Server Error`: Server error
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    // Validate request
    req.validate()?;

    let task = Task::create(
        &state.db,
        CreateTask {
            user_id: auth.user_id,
            title: req.title,
            description: req.description,
            status: req.status,
            due_date: req.due_date,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Fetch a single task
///
/// # Endpoint
///
/// ```text
/// GET /tasks/:id
/// Authorization: Bearer <token>
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid session token
/// - `403 Forbidden`: Task belongs to another user
/// - `404 Not Found`: Unknown task id
/// - `500 Internal Server Error`: Server error
pub async fn get_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Task>> {
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    authorize_task_access(&auth, &task)?;

    Ok(Json(task))
}

/// Update a task
///
/// Partial update: only fields present in the body are written; everything
/// else is left untouched. Concurrent updates to the same task are not
/// coordinated (last write wins).
///
/// # Endpoint
///
/// ```text
/// PUT /tasks/:id
/// PATCH /tasks/:id
/// Authorization: Bearer <token>
/// Content-Type: application/json
///
/// { "status": "completed" }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid session token
/// - `403 Forbidden`: Task belongs to another user
/// - `404 Not Found`: Unknown task id
/// - `422 Unprocessable Entity`: Validation failed
/// - `500 Internal Server Error`: Server error
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    // The guard runs against the current row before anything is written
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    authorize_task_access(&auth, &task)?;

    // Validate request
    req.validate()?;

    let updated = Task::update(
        &state.db,
        task.id,
        UpdateTask {
            title: req.title,
            description: req.description,
            status: req.status,
            due_date: req.due_date,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(updated))
}

/// Delete a task
///
/// # Endpoint
///
/// ```text
/// DELETE /tasks/:id
/// Authorization: Bearer <token>
/// ```
///
/// # Response
///
/// ```json
/// { "message": "Task deleted successfully" }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid session token
/// - `403 Forbidden`: Task belongs to another user
/// - `404 Not Found`: Unknown task id
/// - `500 Internal Server Error`: Server error
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteTaskResponse>> {
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    authorize_task_access(&auth, &task)?;

    Task::delete(&state.db, task.id).await?;

    Ok(Json(DeleteTaskResponse {
        message: "Task deleted successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_null_vs_absent() {
        // Absent fields mean "no change"
        let update: UpdateTaskRequest = serde_json::from_str("{}").unwrap();
        assert!(update.description.is_none());
        assert!(update.due_date.is_none());

        // Explicit null means "clear"
        let update: UpdateTaskRequest =
            serde_json::from_str(r#"{"description": null, "due_date": null}"#).unwrap();
        assert_eq!(update.description, Some(None));
        assert_eq!(update.due_date, Some(None));

        // A value means "set"
        let update: UpdateTaskRequest =
            serde_json::from_str(r#"{"description": "notes", "due_date": "2025-03-01"}"#).unwrap();
        assert_eq!(update.description, Some(Some("notes".to_string())));
        assert_eq!(
            update.due_date,
            Some(Some(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()))
        );
    }

    #[test]
    fn test_create_request_rejects_unknown_status() {
        let result: Result<CreateTaskRequest, _> =
            serde_json::from_str(r#"{"title": "T", "status": "done"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_create_request_accepts_in_progress() {
        let req: CreateTaskRequest =
            serde_json::from_str(r#"{"title": "T", "status": "in progress"}"#).unwrap();
        assert_eq!(req.status, TaskStatus::InProgress);
        assert!(req.description.is_none());
        assert!(req.due_date.is_none());
    }

    #[test]
    fn test_update_request_title_validation() {
        let req = UpdateTaskRequest {
            title: Some("".to_string()),
            ..Default::default()
        };
        assert!(req.validate().is_err());

        let req = UpdateTaskRequest {
            title: Some("A real title".to_string()),
            ..Default::default()
        };
        assert!(req.validate().is_ok());
    }
}
