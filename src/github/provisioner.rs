// ABOUTME: Repository provisioning trait: create, upload, enable publishing.
// ABOUTME: Each call is one request with no retry; sequencing belongs to the orchestrator.

use async_trait::async_trait;
use serde::Deserialize;

use super::error::ProvisionError;
use crate::types::{Credential, TargetName};

/// What the provider reports back about a freshly created repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TargetHandle {
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub default_branch: Option<String>,
}

/// Remote operations that stand up a hosted site.
#[async_trait]
pub trait Provisioner: Send + Sync {
    /// Create a public, auto-initialised repository owned by the credential's user.
    ///
    /// Fails if the name is taken; collisions are never resolved automatically.
    async fn create_target(
        &self,
        credential: &Credential,
        name: &TargetName,
        description: &str,
    ) -> Result<TargetHandle, ProvisionError>;

    /// Write `content` at `path` in a single commit, replacing whatever was there.
    async fn upload_content(
        &self,
        credential: &Credential,
        owner: &str,
        name: &TargetName,
        path: &str,
        content: &[u8],
        message: &str,
    ) -> Result<(), ProvisionError>;

    /// Turn on static hosting for `branch` at `path`.
    ///
    /// Callers treat failure as non-fatal: hosting may already be enabled.
    async fn enable_publishing(
        &self,
        credential: &Credential,
        owner: &str,
        name: &TargetName,
        branch: &str,
        path: &str,
    ) -> Result<(), ProvisionError>;
}
