//! Task store use-case service.
//!
//! # Responsibility
//! - Provide the four task-store operations: list, create, update, delete.
//! - Enforce caller identity and record ownership through the guard before
//!   any repository mutation.
//!
//! # Invariants
//! - Every write is authorized first; there is no unguarded mutation path.
//! - Returned records always reflect persisted state (post-write read-back).
//! - Service APIs never bypass repository validation contracts.

use crate::auth::guard::{self, GuardError};
use crate::model::task::{validate_title, Task, TaskId, TaskPatch, TaskValidationError, UserId};
use crate::repo::task_repo::{RepoError, TaskRepository};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, TaskStoreError>;

/// Task store error taxonomy.
#[derive(Debug)]
pub enum TaskStoreError {
    /// User input failed field validation; the operation was not attempted.
    Validation(TaskValidationError),
    /// Caller is not signed in, or does not own the target task.
    Unauthorized,
    /// Target identifier resolves to no record.
    NotFound(TaskId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for TaskStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Unauthorized => write!(f, "not authorized for this task operation"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent task state: {details}"),
        }
    }
}

impl Error for TaskStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TaskValidationError> for TaskStoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<GuardError> for TaskStoreError {
    fn from(value: GuardError) -> Self {
        match value {
            GuardError::Unauthorized => Self::Unauthorized,
            GuardError::NotFound(id) => Self::NotFound(id),
        }
    }
}

impl From<RepoError> for TaskStoreError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Use-case service wrapper for owner-scoped task CRUD.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists the caller's tasks, newest first.
    ///
    /// Returns an empty vec (not an error) when the caller has no tasks;
    /// never includes another owner's task.
    pub fn list_tasks(&self, identity: Option<&UserId>) -> StoreResult<Vec<Task>> {
        let caller = guard::require_caller(identity)?;
        let tasks = self.repo.list_tasks_for_owner(caller)?;
        Ok(tasks)
    }

    /// Creates a task owned by the caller.
    ///
    /// # Contract
    /// - Rejects titles that trim to empty with `Validation`.
    /// - Assigns a fresh id, `completed = false`, and the creation instant.
    /// - Returns the persisted record.
    pub fn create_task(&self, identity: Option<&UserId>, title: &str) -> StoreResult<Task> {
        let caller = guard::require_caller(identity)?;
        validate_title(title)?;

        let task = Task::new(caller.clone(), title);
        let id = self.repo.insert_task(&task)?;
        let created = self
            .repo
            .get_task(id)?
            .ok_or(TaskStoreError::InconsistentState(
                "created task not found in read-back",
            ))?;

        info!("event=task_create module=service status=ok task={id} owner={caller}");
        Ok(created)
    }

    /// Applies a patch to one of the caller's tasks.
    ///
    /// # Contract
    /// - A title present in the patch is re-validated.
    /// - Absent patch fields leave stored values unchanged.
    /// - Fails `NotFound` before the ownership comparison, `Unauthorized`
    ///   when the stored owner differs from the caller.
    /// - Returns the post-update record.
    pub fn update_task(
        &self,
        identity: Option<&UserId>,
        task_id: TaskId,
        patch: &TaskPatch,
    ) -> StoreResult<Task> {
        let caller = guard::require_caller(identity)?;
        if let Some(title) = &patch.title {
            validate_title(title)?;
        }

        let stored = self.repo.get_task(task_id)?;
        let current = guard::authorize_target(caller, task_id, stored.as_ref())?;

        let mut updated = current.clone();
        patch.apply_to(&mut updated);
        self.repo.update_task(&updated)?;

        let task = self
            .repo
            .get_task(task_id)?
            .ok_or(TaskStoreError::InconsistentState(
                "updated task not found in read-back",
            ))?;

        info!("event=task_update module=service status=ok task={task_id} owner={caller}");
        Ok(task)
    }

    /// Permanently deletes one of the caller's tasks.
    ///
    /// Same guard path as `update_task`; deletion is immediate, there is
    /// no tombstone to restore from.
    pub fn delete_task(&self, identity: Option<&UserId>, task_id: TaskId) -> StoreResult<()> {
        let caller = guard::require_caller(identity)?;

        let stored = self.repo.get_task(task_id)?;
        guard::authorize_target(caller, task_id, stored.as_ref())?;
        self.repo.delete_task(task_id)?;

        info!("event=task_delete module=service status=ok task={task_id} owner={caller}");
        Ok(())
    }
}
