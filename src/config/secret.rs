// ABOUTME: Secret configuration values: inline literals or environment variable references.
// ABOUTME: Debug output never shows the resolved or literal secret.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;

#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SecretValue {
    Literal(String),
    FromEnv {
        #[serde(rename = "env")]
        var: String,
        #[serde(default)]
        default: Option<String>,
    },
}

impl SecretValue {
    pub fn from_env(var: &str) -> Self {
        SecretValue::FromEnv {
            var: var.to_string(),
            default: None,
        }
    }

    pub fn resolve(&self) -> Result<String> {
        match self {
            SecretValue::Literal(s) => Ok(s.clone()),
            SecretValue::FromEnv { var, default } => std::env::var(var)
                .ok()
                .filter(|v| !v.is_empty())
                .or_else(|| default.clone())
                .ok_or_else(|| Error::MissingEnvVar(var.clone())),
        }
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretValue::Literal(_) => f.write_str("Literal(***)"),
            SecretValue::FromEnv { var, .. } => write!(f, "FromEnv({var})"),
        }
    }
}
