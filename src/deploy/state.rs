// ABOUTME: Deployment state as a closed tagged enum, one variant per phase.
// ABOUTME: Each variant carries the data that exists in that phase and nothing more.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

use super::outcome::StepOutcome;
use crate::types::{SiteUrls, TargetName};

/// Where a deployment is, with the data known at that point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeploymentState {
    /// Nothing running. Available actions: `start()`
    Idle,

    /// Repository creation in flight.
    Creating { target: TargetName },

    /// Repository exists; page upload in flight.
    Uploading {
        target: TargetName,
        repository_url: String,
    },

    /// Page uploaded; hosting being switched on.
    Configuring {
        target: TargetName,
        repository_url: String,
    },

    /// Counting elapsed time until the site answers.
    /// Available actions: `check_status()`
    Waiting(Polling),

    /// A reachability probe is in flight.
    Checking(Polling),

    /// Site answered. Terminal.
    Success(Published),

    /// Unrecoverable failure. Available actions: `reset()`
    Error {
        message: String,
        repository_url: Option<String>,
    },
}

/// Data shared by `Waiting` and `Checking`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Polling {
    pub target: TargetName,
    pub urls: SiteUrls,
    #[serde(with = "humantime_serde")]
    pub elapsed: Duration,
    /// Set once a probe fails after the stall threshold. Waiting continues.
    pub stalled: bool,
    pub publish: StepOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Published {
    pub target: TargetName,
    pub urls: SiteUrls,
    /// Time spent waiting for the site, from entering `Waiting` to a successful probe.
    #[serde(with = "humantime_serde")]
    pub duration: Duration,
    pub finished_at: DateTime<Utc>,
}

/// Variant name without data, for logs and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentStatus {
    Idle,
    Creating,
    Uploading,
    Configuring,
    Waiting,
    Checking,
    Success,
    Error,
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeploymentStatus::Idle => "idle",
            DeploymentStatus::Creating => "creating",
            DeploymentStatus::Uploading => "uploading",
            DeploymentStatus::Configuring => "configuring",
            DeploymentStatus::Waiting => "waiting",
            DeploymentStatus::Checking => "checking",
            DeploymentStatus::Success => "success",
            DeploymentStatus::Error => "error",
        };
        f.write_str(name)
    }
}

impl DeploymentState {
    pub fn status(&self) -> DeploymentStatus {
        match self {
            DeploymentState::Idle => DeploymentStatus::Idle,
            DeploymentState::Creating { .. } => DeploymentStatus::Creating,
            DeploymentState::Uploading { .. } => DeploymentStatus::Uploading,
            DeploymentState::Configuring { .. } => DeploymentStatus::Configuring,
            DeploymentState::Waiting(_) => DeploymentStatus::Waiting,
            DeploymentState::Checking(_) => DeploymentStatus::Checking,
            DeploymentState::Success(_) => DeploymentStatus::Success,
            DeploymentState::Error { .. } => DeploymentStatus::Error,
        }
    }

    pub fn target(&self) -> Option<&TargetName> {
        match self {
            DeploymentState::Creating { target }
            | DeploymentState::Uploading { target, .. }
            | DeploymentState::Configuring { target, .. } => Some(target),
            DeploymentState::Waiting(p) | DeploymentState::Checking(p) => Some(&p.target),
            DeploymentState::Success(p) => Some(&p.target),
            DeploymentState::Idle | DeploymentState::Error { .. } => None,
        }
    }

    /// Set once the repository has been created.
    pub fn repository_url(&self) -> Option<&str> {
        match self {
            DeploymentState::Uploading { repository_url, .. }
            | DeploymentState::Configuring { repository_url, .. } => Some(repository_url),
            DeploymentState::Waiting(p) | DeploymentState::Checking(p) => {
                Some(&p.urls.repository_url)
            }
            DeploymentState::Success(p) => Some(&p.urls.repository_url),
            DeploymentState::Error { repository_url, .. } => repository_url.as_deref(),
            DeploymentState::Idle | DeploymentState::Creating { .. } => None,
        }
    }

    /// Set once hosting has been configured, whether or not that step succeeded.
    pub fn hosting_url(&self) -> Option<&str> {
        match self {
            DeploymentState::Waiting(p) | DeploymentState::Checking(p) => {
                Some(&p.urls.hosting_url)
            }
            DeploymentState::Success(p) => Some(&p.urls.hosting_url),
            _ => None,
        }
    }

    pub fn polling(&self) -> Option<&Polling> {
        match self {
            DeploymentState::Waiting(p) | DeploymentState::Checking(p) => Some(p),
            _ => None,
        }
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.polling().map(|p| p.elapsed)
    }

    pub fn is_checking(&self) -> bool {
        matches!(self, DeploymentState::Checking(_))
    }

    pub fn is_stalled(&self) -> bool {
        self.polling().is_some_and(|p| p.stalled)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DeploymentState::Success(_) | DeploymentState::Error { .. }
        )
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            DeploymentState::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Whether the grace period has passed with no probe in flight.
    pub fn probe_due(&self, grace_period: Duration) -> bool {
        matches!(self, DeploymentState::Waiting(p) if p.elapsed >= grace_period)
    }
}
