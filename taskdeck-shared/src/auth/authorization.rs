/// Authorization helpers for task ownership
///
/// This module is the access guard between an authenticated caller and a
/// specific task. The rule is deliberately narrow: a task may be read,
/// updated, or deleted only by its owner. The guard runs after the task has
/// been fetched, so a caller probing someone else's task id receives an
/// explicit forbidden outcome rather than a not-found.
///
/// List operations never go through this guard; they are scoped to the owner
/// at the query level instead (`Task::list_by_owner`).
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::auth::authorization::authorize_task_access;
/// use taskdeck_shared::auth::middleware::AuthContext;
/// use taskdeck_shared::models::task::Task;
///
/// fn check(auth: &AuthContext, task: &Task) -> Result<(), String> {
///     authorize_task_access(auth, task).map_err(|e| e.to_string())
/// }
/// ```

use crate::auth::middleware::AuthContext;
use crate::models::task::Task;

/// Error type for authorization checks
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// Caller is not the owner of the task
    #[error("Not authorized to access this task")]
    NotOwner,
}

/// Checks that the authenticated caller owns the given task
///
/// Returns `Ok(())` iff `task.user_id == auth.user_id`; every other case is
/// `AuthzError::NotOwner`. This check is mandatory before any read, update,
/// or delete of a specific task.
pub fn authorize_task_access(auth: &AuthContext, task: &Task) -> Result<(), AuthzError> {
    if task.user_id == auth.user_id {
        Ok(())
    } else {
        Err(AuthzError::NotOwner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::task::TaskStatus;
    use chrono::Utc;
    use uuid::Uuid;

    fn task_owned_by(user_id: Uuid) -> Task {
        Task {
            id: Uuid::new_v4(),
            user_id,
            title: "Test task".to_string(),
            description: None,
            status: TaskStatus::Pending,
            due_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn auth_for(user_id: Uuid) -> AuthContext {
        AuthContext {
            user_id,
            session_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_owner_is_allowed() {
        let user_id = Uuid::new_v4();
        let task = task_owned_by(user_id);
        let auth = auth_for(user_id);

        assert!(authorize_task_access(&auth, &task).is_ok());
    }

    #[test]
    fn test_non_owner_is_denied() {
        let task = task_owned_by(Uuid::new_v4());
        let auth = auth_for(Uuid::new_v4());

        let result = authorize_task_access(&auth, &task);
        assert!(matches!(result, Err(AuthzError::NotOwner)));
    }

    #[test]
    fn test_denial_never_depends_on_session() {
        // Two different sessions of the same user are both allowed
        let user_id = Uuid::new_v4();
        let task = task_owned_by(user_id);

        for _ in 0..2 {
            let auth = auth_for(user_id);
            assert!(authorize_task_access(&auth, &task).is_ok());
        }
    }
}
