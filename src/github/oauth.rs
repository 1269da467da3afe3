// ABOUTME: GitHub OAuth identity provider: authorize URL, code exchange, identity fetch.
// ABOUTME: Implements the IdentityProvider trait consumed by the authorization flow.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};

use super::API_ACCEPT;
use crate::auth::AuthError;
use crate::types::{Credential, Identity};

/// Credential and identity produced by a successful exchange.
#[derive(Debug, Clone)]
pub struct Session {
    pub credential: Credential,
    pub identity: Identity,
}

/// Third-party identity provider behind the OAuth redirect.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// URL the user visits to grant access; `state` comes back on the redirect.
    fn authorize_url(&self, state: &str) -> String;

    /// Exchange an authorization code for a credential, then fetch the identity.
    async fn exchange(&self, code: &str) -> Result<Session, AuthError>;

    /// Fetch the identity that owns `credential`.
    async fn identity(&self, credential: &Credential) -> Result<Identity, AuthError>;
}

#[derive(Debug, Clone)]
pub struct OAuthApp {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scope: String,
}

#[derive(Debug, Clone)]
pub struct GitHubOAuth {
    http: reqwest::Client,
    app: OAuthApp,
    oauth_url: String,
    api_url: String,
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl TokenResponse {
    /// Pull the credential out, surfacing the provider's error payload if present.
    pub fn into_credential(self) -> Result<Credential, AuthError> {
        if let Some(error) = self.error {
            return Err(AuthError::Provider(
                self.error_description.unwrap_or(error),
            ));
        }
        match self.access_token {
            Some(token) if !token.is_empty() => Ok(Credential::new(token)),
            _ => Err(AuthError::MissingToken),
        }
    }
}

#[derive(Deserialize)]
struct UserResponse {
    login: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    avatar_url: String,
    #[serde(default)]
    html_url: String,
}

impl From<UserResponse> for Identity {
    fn from(user: UserResponse) -> Self {
        let name = user
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| user.login.clone());
        Identity {
            login: user.login,
            name,
            avatar_url: user.avatar_url,
            html_url: user.html_url,
        }
    }
}

impl GitHubOAuth {
    pub fn new(
        http: reqwest::Client,
        app: OAuthApp,
        oauth_url: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            app,
            oauth_url: oauth_url.into().trim_end_matches('/').to_string(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn request_token(&self, code: &str) -> Result<Credential, AuthError> {
        let resp = self
            .http
            .post(format!("{}/login/oauth/access_token", self.oauth_url))
            .header(ACCEPT, "application/json")
            .json(&TokenRequest {
                client_id: &self.app.client_id,
                client_secret: &self.app.client_secret,
                code,
            })
            .send()
            .await
            .map_err(|e| AuthError::ExchangeFailed(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            tracing::debug!(%status, "token exchange rejected");
            return Err(AuthError::ExchangeFailed(format!(
                "Failed to exchange code for token (HTTP {status})"
            )));
        }

        resp.json::<TokenResponse>()
            .await
            .map_err(|e| AuthError::ExchangeFailed(e.to_string()))?
            .into_credential()
    }
}

#[async_trait]
impl IdentityProvider for GitHubOAuth {
    fn authorize_url(&self, state: &str) -> String {
        format!(
            "{}/login/oauth/authorize?client_id={}&redirect_uri={}&scope={}&state={}&allow_signup=true",
            self.oauth_url,
            urlencoding::encode(&self.app.client_id),
            urlencoding::encode(&self.app.redirect_uri),
            urlencoding::encode(&self.app.scope),
            urlencoding::encode(state),
        )
    }

    async fn exchange(&self, code: &str) -> Result<Session, AuthError> {
        tracing::info!("exchanging authorization code");
        let credential = self.request_token(code).await?;
        let identity = self.identity(&credential).await?;
        tracing::info!(login = %identity.login, "authenticated");
        Ok(Session {
            credential,
            identity,
        })
    }

    async fn identity(&self, credential: &Credential) -> Result<Identity, AuthError> {
        fetch_identity(&self.http, &self.api_url, credential).await
    }
}

/// `GET {api_url}/user` with a bearer token. Needs no OAuth app.
pub async fn fetch_identity(
    http: &reqwest::Client,
    api_url: &str,
    credential: &Credential,
) -> Result<Identity, AuthError> {
    let resp = http
        .get(format!("{}/user", api_url.trim_end_matches('/')))
        .bearer_auth(credential.expose())
        .header(ACCEPT, API_ACCEPT)
        .send()
        .await
        .map_err(|e| AuthError::IdentityFailed(e.to_string()))?;

    if !resp.status().is_success() {
        return Err(AuthError::IdentityFailed(format!(
            "Failed to fetch user data (HTTP {})",
            resp.status()
        )));
    }

    let user = resp
        .json::<UserResponse>()
        .await
        .map_err(|e| AuthError::IdentityFailed(e.to_string()))?;
    Ok(user.into())
}
