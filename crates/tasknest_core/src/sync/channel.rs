//! Channel contract shared by both sync modes.
//!
//! # Responsibility
//! - Define the four logical task operations every channel exposes.
//! - Map store-internal failures onto the channel error taxonomy.
//!
//! # Invariants
//! - Caller identity is resolved per call inside the channel; consumers
//!   never pass identities explicitly.
//! - Internal repo/db failures surface as `Transport`, never leak raw.

use crate::model::task::{Task, TaskId, TaskPatch, TaskValidationError};
use crate::service::task_service::TaskStoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type ChannelResult<T> = Result<T, ChannelError>;

/// Channel-boundary error taxonomy, shared by push and pull modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// Input failed field validation; recoverable locally.
    Validation(TaskValidationError),
    /// Caller not signed in, or not the owner of the target task.
    Unauthorized,
    /// Target identifier resolves to no record.
    NotFound(TaskId),
    /// Subscription or request failure; not retried automatically.
    Transport(String),
}

impl Display for ChannelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Unauthorized => write!(f, "not authorized for this task operation"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::Transport(message) => write!(f, "sync transport failure: {message}"),
        }
    }
}

impl Error for ChannelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TaskStoreError> for ChannelError {
    fn from(value: TaskStoreError) -> Self {
        match value {
            TaskStoreError::Validation(err) => Self::Validation(err),
            TaskStoreError::Unauthorized => Self::Unauthorized,
            TaskStoreError::NotFound(id) => Self::NotFound(id),
            other => Self::Transport(other.to_string()),
        }
    }
}

/// The four logical operations exposed by every sync channel.
///
/// Which implementation backs a deployment is decided once at composition
/// time (`SyncMode`), so store and view logic are written once against
/// this trait.
pub trait TaskChannel {
    /// Current task list for the resolved caller, newest first.
    fn list_tasks(&self) -> ChannelResult<Vec<Task>>;

    /// Creates a task owned by the resolved caller.
    fn create_task(&self, title: &str) -> ChannelResult<Task>;

    /// Applies a patch to one of the caller's tasks.
    fn update_task(&self, task_id: TaskId, patch: &TaskPatch) -> ChannelResult<Task>;

    /// Permanently deletes one of the caller's tasks.
    fn delete_task(&self, task_id: TaskId) -> ChannelResult<()>;
}

// Shared handles stay usable as channels, so an embedder can keep one
// clone for subscriptions while the view-model owns another.
impl<C: TaskChannel + ?Sized> TaskChannel for Arc<C> {
    fn list_tasks(&self) -> ChannelResult<Vec<Task>> {
        (**self).list_tasks()
    }

    fn create_task(&self, title: &str) -> ChannelResult<Task> {
        (**self).create_task(title)
    }

    fn update_task(&self, task_id: TaskId, patch: &TaskPatch) -> ChannelResult<Task> {
        (**self).update_task(task_id, patch)
    }

    fn delete_task(&self, task_id: TaskId) -> ChannelResult<()> {
        (**self).delete_task(task_id)
    }
}
