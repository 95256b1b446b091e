//! Core domain logic for TaskNest.
//! This crate is the single source of truth for business invariants.

pub mod auth;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod sync;
pub mod view;

pub use auth::guard::{authorize_target, require_caller, GuardError};
pub use auth::session::{IdentityResolver, SessionIdentity};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Task, TaskId, TaskPatch, TaskValidationError, UserId};
pub use repo::task_repo::{RepoError, RepoResult, SqliteTaskRepository, TaskRepository};
pub use service::task_service::{StoreResult, TaskService, TaskStoreError};
pub use sync::{
    parse_sync_mode, ChannelError, ChannelResult, PullChannel, PushChannel, SnapshotDelivery,
    Subscription, SubscriptionState, SyncMode, SyncModeError, TaskChannel,
};
pub use view::projection::{
    parse_task_filter, parse_task_sort, TaskFilter, TaskSort, ViewOptionError,
};
pub use view::view_model::{EditDraft, Notification, NotificationKind, TaskViewModel};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
