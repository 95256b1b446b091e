//! Pull-mode channel: one request/response exchange per operation.
//!
//! # Responsibility
//! - Pass each operation straight through to the task store.
//! - Resolve caller identity per request.
//!
//! # Invariants
//! - Each response reflects a store state at-or-after the request was
//!   accepted; observing others' concurrent changes requires re-issuing
//!   `list_tasks`.
//! - No push notification, no retry, no cross-request ordering guarantee.

use crate::auth::session::IdentityResolver;
use crate::model::task::{Task, TaskId, TaskPatch};
use crate::repo::task_repo::TaskRepository;
use crate::service::task_service::TaskService;
use crate::sync::channel::{ChannelResult, TaskChannel};
use std::sync::Arc;

/// Request/response channel over the task store.
pub struct PullChannel<R: TaskRepository> {
    service: TaskService<R>,
    identity: Arc<dyn IdentityResolver>,
}

impl<R: TaskRepository> PullChannel<R> {
    /// Composes a pull channel from an injected store and identity source.
    pub fn new(service: TaskService<R>, identity: Arc<dyn IdentityResolver>) -> Self {
        Self { service, identity }
    }
}

impl<R: TaskRepository> TaskChannel for PullChannel<R> {
    fn list_tasks(&self) -> ChannelResult<Vec<Task>> {
        let identity = self.identity.current_identity();
        Ok(self.service.list_tasks(identity.as_ref())?)
    }

    fn create_task(&self, title: &str) -> ChannelResult<Task> {
        let identity = self.identity.current_identity();
        Ok(self.service.create_task(identity.as_ref(), title)?)
    }

    fn update_task(&self, task_id: TaskId, patch: &TaskPatch) -> ChannelResult<Task> {
        let identity = self.identity.current_identity();
        Ok(self.service.update_task(identity.as_ref(), task_id, patch)?)
    }

    fn delete_task(&self, task_id: TaskId) -> ChannelResult<()> {
        let identity = self.identity.current_identity();
        Ok(self.service.delete_task(identity.as_ref(), task_id)?)
    }
}
