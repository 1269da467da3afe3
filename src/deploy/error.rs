// ABOUTME: Error types for driving the deployment state machine.
// ABOUTME: Provisioning failures are states, not errors; these cover misuse of the machine.

use super::state::DeploymentStatus;
use crate::types::ProfileError;

#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// Profile failed validation before any remote call.
    #[error("invalid profile: {0}")]
    InvalidProfile(#[from] ProfileError),

    /// `start()` called while a deployment is not idle.
    #[error("a deployment is already {status}")]
    AlreadyStarted { status: DeploymentStatus },

    /// `reset()` called outside the error state.
    #[error("cannot reset a deployment that is {status}")]
    NotResettable { status: DeploymentStatus },

    #[error("event '{event}' is not valid while {from}")]
    InvalidTransition {
        from: DeploymentStatus,
        event: &'static str,
    },

    /// The session that owned this deployment was closed.
    #[error("deployment session closed")]
    Closed,
}
