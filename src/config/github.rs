// ABOUTME: GitHub endpoint and OAuth application settings.
// ABOUTME: Defaults target github.com; URLs are overridable for GitHub Enterprise.

use serde::Deserialize;

use super::SecretValue;
use crate::error::{Error, Result};
use crate::github::OAuthApp;

#[derive(Debug, Clone, Deserialize)]
pub struct GitHubConfig {
    #[serde(default)]
    pub client_id: String,

    #[serde(default)]
    pub client_secret: Option<SecretValue>,

    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,

    #[serde(default = "default_scope")]
    pub scope: String,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_oauth_url")]
    pub oauth_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: None,
            redirect_uri: default_redirect_uri(),
            scope: default_scope(),
            api_url: default_api_url(),
            oauth_url: default_oauth_url(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_redirect_uri() -> String {
    "http://localhost:8080/callback".to_string()
}

fn default_scope() -> String {
    "public_repo,user:email".to_string()
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_oauth_url() -> String {
    "https://github.com".to_string()
}

fn default_user_agent() -> String {
    "PromptFolio-App".to_string()
}

impl GitHubConfig {
    /// OAuth application details with the client secret resolved.
    pub fn oauth_app(&self) -> Result<OAuthApp> {
        if self.client_id.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "github.client_id is required for login".to_string(),
            ));
        }
        let client_secret = self
            .client_secret
            .as_ref()
            .ok_or_else(|| {
                Error::InvalidConfig("github.client_secret is required for login".to_string())
            })?
            .resolve()?;

        Ok(OAuthApp {
            client_id: self.client_id.clone(),
            client_secret,
            redirect_uri: self.redirect_uri.clone(),
            scope: self.scope.clone(),
        })
    }
}
