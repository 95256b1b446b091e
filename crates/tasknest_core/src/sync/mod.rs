//! Store-to-consumer synchronization channels.
//!
//! # Responsibility
//! - Define the channel contract shared by both sync modes.
//! - Provide the push (snapshot subscription) and pull (request/response)
//!   implementations plus deployment-time mode selection.
//!
//! # Invariants
//! - Both modes expose the same four operations and the same error
//!   taxonomy.
//! - Mode is a composition-time decision, never a per-call choice.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod channel;
pub mod pull;
pub mod push;

pub use channel::{ChannelError, ChannelResult, TaskChannel};
pub use pull::PullChannel;
pub use push::{PushChannel, SnapshotDelivery, Subscription, SubscriptionState};

/// Synchronization mode, fixed when the deployment is composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Subscription streaming full-list snapshots on every change.
    Push,
    /// Explicit request/response per operation.
    Pull,
}

impl SyncMode {
    /// Stable string id used in deployment configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Pull => "pull",
        }
    }
}

/// Parses one sync mode from a configuration string value.
pub fn parse_sync_mode(value: &str) -> Result<SyncMode, SyncModeError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(SyncModeError::EmptyMode);
    }

    match normalized {
        "push" => Ok(SyncMode::Push),
        "pull" => Ok(SyncMode::Pull),
        other => Err(SyncModeError::UnsupportedMode(other.to_string())),
    }
}

/// Sync mode parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncModeError {
    EmptyMode,
    UnsupportedMode(String),
}

impl Display for SyncModeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMode => write!(f, "sync mode value must not be empty"),
            Self::UnsupportedMode(value) => write!(f, "sync mode is unsupported: {value}"),
        }
    }
}

impl Error for SyncModeError {}

#[cfg(test)]
mod tests {
    use super::{parse_sync_mode, SyncMode, SyncModeError};

    #[test]
    fn parses_both_supported_modes() {
        assert_eq!(parse_sync_mode("push").expect("push parse"), SyncMode::Push);
        assert_eq!(parse_sync_mode("pull").expect("pull parse"), SyncMode::Pull);
        assert_eq!(parse_sync_mode(" pull ").expect("trimmed parse"), SyncMode::Pull);
    }

    #[test]
    fn rejects_empty_mode() {
        let err = parse_sync_mode("   ").expect_err("empty mode must fail");
        assert_eq!(err, SyncModeError::EmptyMode);
    }

    #[test]
    fn rejects_unsupported_mode() {
        let err = parse_sync_mode("gossip").expect_err("unsupported mode must fail");
        assert_eq!(err, SyncModeError::UnsupportedMode("gossip".to_string()));
    }

    #[test]
    fn mode_ids_round_trip() {
        for mode in [SyncMode::Push, SyncMode::Pull] {
            assert_eq!(parse_sync_mode(mode.as_str()), Ok(mode));
        }
    }
}
