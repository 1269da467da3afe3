// ABOUTME: Authenticated GitHub identity and the bearer credential that goes with it.
// ABOUTME: The credential redacts itself in Debug output so it never reaches logs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The account a deployment publishes under. Obtained once per session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique handle; drives the hosting URL and the repository owner.
    pub login: String,
    pub name: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
}

impl Identity {
    /// Identity with only a login known, as used for offline previews.
    pub fn from_login(login: &str) -> Self {
        Self {
            login: login.to_string(),
            name: login.to_string(),
            avatar_url: String::new(),
            html_url: format!("https://github.com/{login}"),
        }
    }
}

/// Opaque bearer token scoped to repository creation and content writes.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for building an `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}
