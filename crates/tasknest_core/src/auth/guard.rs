//! Ownership guard decision functions.
//!
//! # Responsibility
//! - Decide pass/fail for every task operation given a resolved identity.
//! - Keep the unauthorized signal generic so one user's guard failures
//!   never reveal whether another user's task exists.
//!
//! # Invariants
//! - `NotFound` is checked before the ownership comparison.
//! - A blank identity never passes; there is no silent no-op path.

use crate::model::task::{Task, TaskId, UserId};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Guard decision errors.
///
/// "Not authenticated" and "authenticated but not the owner" share one
/// variant on purpose; callers must not be able to distinguish them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardError {
    Unauthorized,
    NotFound(TaskId),
}

impl Display for GuardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized => write!(f, "not authorized for this task operation"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
        }
    }
}

impl Error for GuardError {}

/// Requires a resolved, non-blank caller identity.
///
/// Used by read-list and create, which need no target record.
pub fn require_caller(identity: Option<&UserId>) -> Result<&UserId, GuardError> {
    match identity {
        Some(caller) if !caller.is_empty() => Ok(caller),
        _ => Err(GuardError::Unauthorized),
    }
}

/// Authorizes one update/delete against a looked-up target record.
///
/// # Contract
/// - `stored = None` fails `NotFound` before any ownership comparison.
/// - A stored owner differing from `caller` fails `Unauthorized`.
/// - On success the stored record is handed back for further use.
pub fn authorize_target<'t>(
    caller: &UserId,
    target_id: TaskId,
    stored: Option<&'t Task>,
) -> Result<&'t Task, GuardError> {
    let task = stored.ok_or(GuardError::NotFound(target_id))?;
    if &task.owner_id != caller {
        return Err(GuardError::Unauthorized);
    }
    Ok(task)
}

#[cfg(test)]
mod tests {
    use super::{authorize_target, require_caller, GuardError};
    use crate::model::task::{Task, UserId};

    #[test]
    fn require_caller_rejects_missing_and_blank_identity() {
        assert_eq!(require_caller(None), Err(GuardError::Unauthorized));

        let blank = UserId::new("   ");
        assert_eq!(require_caller(Some(&blank)), Err(GuardError::Unauthorized));
    }

    #[test]
    fn require_caller_passes_resolved_identity_through() {
        let caller = UserId::new("user-a");
        assert_eq!(require_caller(Some(&caller)), Ok(&caller));
    }

    #[test]
    fn missing_target_reports_not_found_before_ownership() {
        let caller = UserId::new("user-a");
        let task = Task::new(UserId::new("user-b"), "theirs");

        let err = authorize_target(&caller, task.id, None).expect_err("missing target must fail");
        assert_eq!(err, GuardError::NotFound(task.id));
    }

    #[test]
    fn foreign_owner_reports_generic_unauthorized() {
        let caller = UserId::new("user-a");
        let task = Task::new(UserId::new("user-b"), "theirs");

        let err = authorize_target(&caller, task.id, Some(&task))
            .expect_err("foreign-owned target must fail");
        assert_eq!(err, GuardError::Unauthorized);
    }

    #[test]
    fn owner_passes_and_gets_the_stored_record_back() {
        let caller = UserId::new("user-a");
        let task = Task::new(caller.clone(), "mine");

        let granted = authorize_target(&caller, task.id, Some(&task)).expect("owner must pass");
        assert_eq!(granted.id, task.id);
    }
}
