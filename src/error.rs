// ABOUTME: Application-wide error types for promptfolio.
// ABOUTME: Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

use crate::auth::AuthError;
use crate::deploy::{DeployError, DeploymentStatus};
use crate::types::ProfileError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("configuration file not found in {0}")]
    ConfigNotFound(PathBuf),

    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid profile: {0}")]
    Profile(#[from] ProfileError),

    #[error("authorization failed: {0}")]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Deploy(#[from] DeployError),

    #[error("deployment failed: {0}")]
    DeploymentFailed(String),

    #[error("interrupted while waiting; the site may still come up at {0}")]
    Interrupted(String),

    #[error("interrupted while {0}; the repository may be partly set up")]
    InterruptedProvisioning(DeploymentStatus),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupt_messages_name_where_it_stopped() {
        let waiting = Error::Interrupted("https://ada.github.io/ada-lovelace-portfolio".into());
        assert!(waiting.to_string().ends_with("https://ada.github.io/ada-lovelace-portfolio"));

        let provisioning = Error::InterruptedProvisioning(DeploymentStatus::Uploading);
        assert_eq!(
            provisioning.to_string(),
            "interrupted while uploading; the repository may be partly set up"
        );
    }
}
