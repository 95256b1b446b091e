//! Identity resolution contract and in-memory session holder.
//!
//! # Responsibility
//! - Define how core obtains the current caller identity, if any.
//! - Provide a settable signed-in/signed-out holder for embedders and
//!   tests.
//!
//! # Invariants
//! - Credential verification and token mechanics live outside core; a
//!   resolver only reports an already-established identity.

use crate::model::task::UserId;
use log::info;
use std::sync::Mutex;

/// Resolves the current caller identity, or none when signed out.
///
/// This is the only contract core requires from the external auth
/// collaborator.
pub trait IdentityResolver {
    fn current_identity(&self) -> Option<UserId>;
}

/// In-memory session state: one optional signed-in user.
#[derive(Debug, Default)]
pub struct SessionIdentity {
    current: Mutex<Option<UserId>>,
}

impl SessionIdentity {
    /// Creates a signed-out session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session already signed in as `user`.
    pub fn signed_in(user: UserId) -> Self {
        Self {
            current: Mutex::new(Some(user)),
        }
    }

    /// Records a successful external sign-in.
    pub fn sign_in(&self, user: UserId) {
        info!("event=session_sign_in module=auth status=ok user={user}");
        *lock_current(&self.current) = Some(user);
    }

    /// Clears the session; subsequent operations resolve no identity.
    pub fn sign_out(&self) {
        info!("event=session_sign_out module=auth status=ok");
        *lock_current(&self.current) = None;
    }
}

impl IdentityResolver for SessionIdentity {
    fn current_identity(&self) -> Option<UserId> {
        lock_current(&self.current).clone()
    }
}

// A poisoned lock only means a panic elsewhere mid-update of a plain
// Option; the stored value is still usable, so recover instead of
// propagating the panic.
fn lock_current(current: &Mutex<Option<UserId>>) -> std::sync::MutexGuard<'_, Option<UserId>> {
    current
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
