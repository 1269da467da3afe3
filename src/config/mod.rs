// ABOUTME: Configuration types and parsing for promptfolio.yml.
// ABOUTME: Handles file discovery, YAML parsing, and the local state directory.

mod deployment;
mod github;
mod init;
mod secret;

pub use deployment::DeploymentConfig;
pub use github::GitHubConfig;
pub use init::init_config;
pub use secret::SecretValue;

use crate::error::{Error, Result};
use crate::form::ProfileForm;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "promptfolio.yml";
pub const CONFIG_FILENAME_ALT: &str = "promptfolio.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".promptfolio/config.yml";

/// Default state directory under `$HOME` (XDG Base Directory layout).
const STATE_DIR: &str = ".local/state/promptfolio";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub profile: ProfileForm,

    #[serde(default)]
    pub github: GitHubConfig,

    #[serde(default)]
    pub deployment: DeploymentConfig,

    #[serde(default)]
    pub state_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.deployment.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading configuration");
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Directory holding state that must survive the OAuth redirect.
    pub fn state_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.state_dir {
            return Ok(dir.clone());
        }
        let home = std::env::var_os("HOME").ok_or_else(|| Error::MissingEnvVar("HOME".into()))?;
        Ok(PathBuf::from(home).join(STATE_DIR))
    }

    pub fn template() -> Self {
        Config {
            profile: ProfileForm {
                name: "Ada Lovelace".to_string(),
                title: "Computer Science Student".to_string(),
                email: "ada@example.com".to_string(),
                bio: String::new(),
                skills: "Rust, Python, Mathematics".to_string(),
                projects: "Analytical Engine notes - Annotated translation with the first published algorithm".to_string(),
                experience: String::new(),
            },
            github: GitHubConfig::default(),
            deployment: DeploymentConfig::default(),
            state_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn minimal_config_gets_defaults() {
        let config = Config::from_yaml("profile:\n  name: Ada\n  email: a@b.com\n").unwrap();
        assert_eq!(config.profile.name, "Ada");
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.github.user_agent, "PromptFolio-App");
        assert_eq!(config.deployment.grace_period, Duration::from_secs(60));
        assert_eq!(config.deployment.probe_timeout, Duration::from_secs(10));
        assert_eq!(config.deployment.stall_after, Duration::from_secs(300));
        assert_eq!(config.deployment.branch, "main");
    }

    #[test]
    fn explicit_state_dir_wins() {
        let config =
            Config::from_yaml("profile:\n  name: Ada\nstate_dir: /tmp/promptfolio-state\n")
                .unwrap();
        assert_eq!(
            config.state_dir().unwrap(),
            PathBuf::from("/tmp/promptfolio-state")
        );
    }

    #[test]
    fn state_dir_defaults_under_home() {
        temp_env::with_var("HOME", Some("/home/ada"), || {
            let config = Config::template();
            assert_eq!(
                config.state_dir().unwrap(),
                PathBuf::from("/home/ada/.local/state/promptfolio")
            );
        });
    }
}
