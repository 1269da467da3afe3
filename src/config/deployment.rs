// ABOUTME: Deployment timing and repository layout settings.
// ABOUTME: Grace period, probe timeout, stall threshold, tick interval, branch and paths.

use serde::Deserialize;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::types::DEFAULT_SUFFIX;

#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentConfig {
    /// No automatic probe before this much time has passed in `Waiting`.
    #[serde(default = "default_grace_period", with = "humantime_serde")]
    pub grace_period: Duration,

    #[serde(default = "default_probe_timeout", with = "humantime_serde")]
    pub probe_timeout: Duration,

    /// Failed probes after this much waiting mark the deployment as stalled.
    #[serde(default = "default_stall_after", with = "humantime_serde")]
    pub stall_after: Duration,

    #[serde(default = "default_tick_interval", with = "humantime_serde")]
    pub tick_interval: Duration,

    #[serde(default = "default_branch")]
    pub branch: String,

    #[serde(default = "default_publish_path")]
    pub publish_path: String,

    #[serde(default = "default_content_path")]
    pub content_path: String,

    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    #[serde(default = "default_target_suffix")]
    pub target_suffix: String,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            grace_period: default_grace_period(),
            probe_timeout: default_probe_timeout(),
            stall_after: default_stall_after(),
            tick_interval: default_tick_interval(),
            branch: default_branch(),
            publish_path: default_publish_path(),
            content_path: default_content_path(),
            commit_message: default_commit_message(),
            target_suffix: default_target_suffix(),
        }
    }
}

impl DeploymentConfig {
    /// Reject timings the wait loop cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval.is_zero() {
            return Err(Error::InvalidConfig(
                "deployment.tick_interval must be greater than zero".to_string(),
            ));
        }
        if self.probe_timeout.is_zero() {
            return Err(Error::InvalidConfig(
                "deployment.probe_timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_grace_period() -> Duration {
    Duration::from_secs(60)
}

fn default_probe_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_stall_after() -> Duration {
    Duration::from_secs(300)
}

fn default_tick_interval() -> Duration {
    Duration::from_secs(1)
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_publish_path() -> String {
    "/".to_string()
}

fn default_content_path() -> String {
    "index.html".to_string()
}

fn default_commit_message() -> String {
    "Add portfolio website".to_string()
}

fn default_target_suffix() -> String {
    DEFAULT_SUFFIX.to_string()
}
