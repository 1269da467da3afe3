// ABOUTME: Profile record that feeds the portfolio page and the deployment.
// ABOUTME: Holds projects and experience entries; validates the fields deployment needs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("profile name cannot be empty")]
    EmptyName,

    #[error("profile email cannot be empty")]
    EmptyEmail,
}

/// Everything the portfolio page says about its owner.
///
/// Built from the form once and never mutated after a deployment starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub email: String,
    pub bio: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub experience: Vec<Experience>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    #[serde(alias = "company")]
    pub organization: String,
    pub duration: String,
    pub description: String,
}

impl Profile {
    /// Check the fields a deployment cannot start without.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.name.trim().is_empty() {
            return Err(ProfileError::EmptyName);
        }
        if self.email.trim().is_empty() {
            return Err(ProfileError::EmptyEmail);
        }
        Ok(())
    }

    /// Initials shown in the page header, one per space-separated word.
    pub fn initials(&self) -> String {
        self.name
            .split(' ')
            .filter_map(|word| word.chars().next())
            .collect()
    }
}
