// ABOUTME: GitHub integration: repository provisioning and OAuth identity.
// ABOUTME: Traits sit at the seams so the orchestrator and auth flow can be tested offline.

mod client;
mod error;
mod oauth;
mod provisioner;

pub use client::{CreateRepoRequest, GitHubClient, PagesRequest, PagesSource, UploadRequest};
pub use error::{Operation, ProvisionError, ProvisionErrorKind};
pub use oauth::{GitHubOAuth, IdentityProvider, OAuthApp, Session, TokenResponse, fetch_identity};
pub use provisioner::{Provisioner, TargetHandle};

/// Media type pinned on every REST request.
pub const API_ACCEPT: &str = "application/vnd.github.v3+json";

/// Shared HTTP client carrying the fixed `User-Agent`.
///
/// No client-side timeout: provisioning calls rely on the transport defaults,
/// and the reachability probe applies its own bound.
pub fn http_client(user_agent: &str) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().user_agent(user_agent).build()
}
