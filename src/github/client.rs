// ABOUTME: GitHub REST implementation of the Provisioner trait.
// ABOUTME: Builds JSON payloads, sends them with the bearer credential, maps failures.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::ACCEPT;
use serde::Serialize;
use snafu::ResultExt;

use super::error::{DecodeSnafu, Operation, ProvisionError, TransportSnafu};
use super::provisioner::{Provisioner, TargetHandle};
use super::API_ACCEPT;
use crate::types::{Credential, TargetName};

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CreateRepoRequest<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub private: bool,
    pub auto_init: bool,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct UploadRequest<'a> {
    pub message: &'a str,
    pub content: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PagesRequest<'a> {
    pub source: PagesSource<'a>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PagesSource<'a> {
    pub branch: &'a str,
    pub path: &'a str,
}

impl<'a> UploadRequest<'a> {
    pub fn new(message: &'a str, content: &[u8]) -> Self {
        Self {
            message,
            content: STANDARD.encode(content),
        }
    }
}

/// Provisioner that talks to the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
}

impl GitHubClient {
    /// `http` should already carry the client's `User-Agent`.
    pub fn new(http: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn contents_url(&self, owner: &str, name: &TargetName, path: &str) -> String {
        format!(
            "{}/repos/{owner}/{name}/contents/{}",
            self.api_url,
            path.trim_start_matches('/')
        )
    }

    pub fn pages_url(&self, owner: &str, name: &TargetName) -> String {
        format!("{}/repos/{owner}/{name}/pages", self.api_url)
    }

    fn authorized(
        &self,
        builder: reqwest::RequestBuilder,
        credential: &Credential,
    ) -> reqwest::RequestBuilder {
        builder
            .bearer_auth(credential.expose())
            .header(ACCEPT, API_ACCEPT)
    }
}

/// Turn a non-success response into a rejection carrying the provider's reason.
async fn check_response(
    resp: reqwest::Response,
    operation: Operation,
) -> Result<reqwest::Response, ProvisionError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    tracing::debug!(%operation, %status, body = %body, "provider rejected request");
    Err(ProvisionError::rejected(operation, status, &body))
}

#[async_trait]
impl Provisioner for GitHubClient {
    async fn create_target(
        &self,
        credential: &Credential,
        name: &TargetName,
        description: &str,
    ) -> Result<TargetHandle, ProvisionError> {
        let operation = Operation::CreateRepository;
        let body = CreateRepoRequest {
            name: name.as_str(),
            description,
            private: false,
            auto_init: true,
        };
        tracing::debug!(repository = %name, "creating repository");

        let resp = self
            .authorized(self.http.post(format!("{}/user/repos", self.api_url)), credential)
            .json(&body)
            .send()
            .await
            .context(TransportSnafu { operation })?;
        let resp = check_response(resp, operation).await?;
        resp.json::<TargetHandle>()
            .await
            .context(DecodeSnafu { operation })
    }

    async fn upload_content(
        &self,
        credential: &Credential,
        owner: &str,
        name: &TargetName,
        path: &str,
        content: &[u8],
        message: &str,
    ) -> Result<(), ProvisionError> {
        let operation = Operation::UploadContent;
        let body = UploadRequest::new(message, content);
        tracing::debug!(repository = %name, path, bytes = content.len(), "uploading content");

        let resp = self
            .authorized(self.http.put(self.contents_url(owner, name, path)), credential)
            .json(&body)
            .send()
            .await
            .context(TransportSnafu { operation })?;
        check_response(resp, operation).await?;
        Ok(())
    }

    async fn enable_publishing(
        &self,
        credential: &Credential,
        owner: &str,
        name: &TargetName,
        branch: &str,
        path: &str,
    ) -> Result<(), ProvisionError> {
        let operation = Operation::EnablePages;
        let body = PagesRequest {
            source: PagesSource { branch, path },
        };
        tracing::debug!(repository = %name, branch, path, "enabling pages");

        let resp = self
            .authorized(self.http.post(self.pages_url(owner, name)), credential)
            .json(&body)
            .send()
            .await
            .context(TransportSnafu { operation })?;
        check_response(resp, operation).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn target() -> TargetName {
        TargetName::derive("Ada Lovelace", "portfolio")
    }

    #[test]
    fn create_payload_is_public_and_initialised() {
        let body = CreateRepoRequest {
            name: "ada-lovelace-portfolio",
            description: "Portfolio website for Ada Lovelace",
            private: false,
            auto_init: true,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "name": "ada-lovelace-portfolio",
                "description": "Portfolio website for Ada Lovelace",
                "private": false,
                "auto_init": true,
            })
        );
    }

    #[test]
    fn upload_payload_is_base64() {
        let body = UploadRequest::new("Add portfolio website", b"<html></html>");
        assert_eq!(body.content, "PGh0bWw+PC9odG1sPg==");
    }

    #[test]
    fn pages_payload_nests_source() {
        let body = PagesRequest {
            source: PagesSource {
                branch: "main",
                path: "/",
            },
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"source": {"branch": "main", "path": "/"}})
        );
    }

    #[test]
    fn urls_are_built_from_api_base() {
        let client = GitHubClient::new(reqwest::Client::new(), "https://api.github.com/");
        assert_eq!(
            client.contents_url("ada", &target(), "index.html"),
            "https://api.github.com/repos/ada/ada-lovelace-portfolio/contents/index.html"
        );
        assert_eq!(
            client.pages_url("ada", &target()),
            "https://api.github.com/repos/ada/ada-lovelace-portfolio/pages"
        );
    }

    #[tokio::test]
    async fn failed_response_becomes_rejection() {
        let resp = reqwest::Response::from(
            ::http::Response::builder()
                .status(422)
                .body(r#"{"message":"Repository creation failed."}"#)
                .unwrap(),
        );
        let err = check_response(resp, Operation::CreateRepository)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Repository creation failed.");
    }
}
