//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical persisted task record.
//! - Provide the explicit optional-field patch shape for updates.
//! - Validate user-provided fields before persistence.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `owner_id` is fixed at creation; ownership never transfers.
//! - `title` must remain non-empty after trimming.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for every task record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Opaque identifier of the user owning a task.
///
/// Issued by the external auth collaborator; core treats it as an opaque
/// non-empty string and never derives meaning from its contents.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Canonical persisted task record.
///
/// Serialized field names follow the external camelCase schema
/// (`ownerId`, `createdAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable global ID, assigned at creation and never reused.
    pub id: TaskId,
    /// Short user-provided text; non-empty after trimming.
    pub title: String,
    /// Completion flag; starts as `false`.
    pub completed: bool,
    /// Identifier of the owning user, fixed at creation.
    pub owner_id: UserId,
    /// Creation instant in Unix epoch milliseconds; default sort key.
    pub created_at: i64,
}

impl Task {
    /// Creates a new task with a generated stable ID and current timestamp.
    ///
    /// # Invariants
    /// - `completed` starts as `false`.
    /// - This constructor does not validate; callers validate before
    ///   persisting.
    pub fn new(owner_id: UserId, title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), owner_id, title)
    }

    /// Creates a new task with a caller-provided stable ID.
    ///
    /// Used by tests and import paths where identity already exists.
    pub fn with_id(id: TaskId, owner_id: UserId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
            owner_id,
            created_at: now_epoch_ms(),
        }
    }

    /// Checks field-level invariants for create/update paths.
    ///
    /// # Errors
    /// - `EmptyTitle` when `title` trims to an empty string.
    /// - `EmptyOwner` when `owner_id` is blank.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        validate_title(&self.title)?;
        if self.owner_id.is_empty() {
            return Err(TaskValidationError::EmptyOwner);
        }
        Ok(())
    }
}

/// Validates one candidate title value.
pub fn validate_title(title: &str) -> Result<(), TaskValidationError> {
    if title.trim().is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    Ok(())
}

/// Explicit optional-field update shape.
///
/// An absent field means "leave unchanged"; `Some` always means "set",
/// including `Some(false)` for `completed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Patch setting only the title.
    pub fn title(value: impl Into<String>) -> Self {
        Self {
            title: Some(value.into()),
            completed: None,
        }
    }

    /// Patch setting only the completion flag.
    pub fn completed(value: bool) -> Self {
        Self {
            title: None,
            completed: Some(value),
        }
    }

    /// Returns whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none()
    }

    /// Applies present fields onto a task record, leaving absent fields
    /// untouched.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}

/// Task field validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyTitle,
    EmptyOwner,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::EmptyOwner => write!(f, "task owner id must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{validate_title, Task, TaskPatch, TaskValidationError, UserId};

    #[test]
    fn new_task_starts_incomplete_with_owner() {
        let task = Task::new(UserId::new("user-a"), "Buy milk");
        assert!(!task.completed);
        assert_eq!(task.owner_id, UserId::new("user-a"));
        assert_eq!(task.title, "Buy milk");
        assert!(task.created_at > 0);
    }

    #[test]
    fn validate_rejects_blank_title_and_owner() {
        let mut task = Task::new(UserId::new("user-a"), "   ");
        assert_eq!(task.validate(), Err(TaskValidationError::EmptyTitle));

        task.title = "ok".to_string();
        task.owner_id = UserId::new("  ");
        assert_eq!(task.validate(), Err(TaskValidationError::EmptyOwner));
    }

    #[test]
    fn validate_title_trims_whitespace() {
        assert_eq!(validate_title(""), Err(TaskValidationError::EmptyTitle));
        assert_eq!(validate_title(" \t "), Err(TaskValidationError::EmptyTitle));
        assert!(validate_title(" x ").is_ok());
    }

    #[test]
    fn patch_applies_only_present_fields() {
        let mut task = Task::new(UserId::new("user-a"), "before");

        TaskPatch::completed(true).apply_to(&mut task);
        assert_eq!(task.title, "before");
        assert!(task.completed);

        TaskPatch::title("after").apply_to(&mut task);
        assert_eq!(task.title, "after");
        assert!(task.completed);

        TaskPatch::default().apply_to(&mut task);
        assert_eq!(task.title, "after");
        assert!(task.completed);
    }

    #[test]
    fn empty_patch_reports_is_empty() {
        assert!(TaskPatch::default().is_empty());
        assert!(!TaskPatch::completed(false).is_empty());
        assert!(!TaskPatch::title("t").is_empty());
    }
}
