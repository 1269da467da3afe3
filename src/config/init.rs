// ABOUTME: Config scaffolding for new portfolios.
// ABOUTME: Writes a commented promptfolio.yml template.

use std::path::Path;

use crate::error::{Error, Result};

use super::{CONFIG_FILENAME, Config};

pub fn init_config(dir: &Path, name: Option<&str>, email: Option<&str>, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let mut config = Config::template();

    if let Some(n) = name {
        if n.trim().is_empty() {
            return Err(Error::InvalidConfig("name cannot be empty".to_string()));
        }
        config.profile.name = n.to_string();
    }

    if let Some(e) = email {
        if e.trim().is_empty() {
            return Err(Error::InvalidConfig("email cannot be empty".to_string()));
        }
        config.profile.email = e.to_string();
    }

    std::fs::write(&config_path, generate_template_yaml(&config)?)?;

    Ok(())
}

/// A single-line YAML scalar for `value`, quoted only where plain text would
/// misparse. Values the emitter would fold or block-format are written as
/// double-quoted JSON strings, which YAML reads back unchanged.
fn scalar(value: &str) -> Result<String> {
    let yaml = serde_yaml::to_string(value)?;
    let yaml = yaml.trim_end_matches('\n');
    if !yaml.contains('\n') {
        return Ok(yaml.to_string());
    }
    serde_json::to_string(value).map_err(|e| Error::InvalidConfig(e.to_string()))
}

fn generate_template_yaml(config: &Config) -> Result<String> {
    Ok(format!(
        r#"profile:
  name: {name}
  title: {title}
  email: {email}
  bio: ""
  # Comma separated
  skills: {skills}
  # One per line: title - description
  projects: {projects}
  # One per line: title - organization - duration - description
  experience: ""

github:
  # OAuth app credentials, needed for `promptfolio login`
  client_id: ""
  client_secret:
    env: GITHUB_CLIENT_SECRET
  redirect_uri: {redirect_uri}

deployment:
  grace_period: 60s
  probe_timeout: 10s
  stall_after: 5m
"#,
        name = scalar(&config.profile.name)?,
        title = scalar(&config.profile.title)?,
        email = scalar(&config.profile.email)?,
        skills = scalar(&config.profile.skills)?,
        projects = scalar(&config.profile.projects)?,
        redirect_uri = scalar(&config.github.redirect_uri)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses_back() {
        let yaml = generate_template_yaml(&Config::template()).unwrap();
        let config = Config::from_yaml(&yaml).unwrap();
        assert_eq!(config.profile.name, "Ada Lovelace");
        assert!(config.profile.projects.starts_with("Analytical Engine notes"));
        assert!(config.github.client_secret.is_some());
    }

    #[test]
    fn init_refuses_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "x").unwrap();
        let err = init_config(dir.path(), None, None, false).unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(_)));
        init_config(dir.path(), Some("Grace Hopper"), None, true).unwrap();
        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.profile.name, "Grace Hopper");
    }

    fn init_with_name(name: &str) -> Config {
        let dir = tempfile::tempdir().unwrap();
        init_config(dir.path(), Some(name), Some("ada@example.com"), false).unwrap();
        Config::discover(dir.path()).unwrap()
    }

    #[test]
    fn name_with_colon_survives_reload() {
        let config = init_with_name("Ada: Lovelace");
        assert_eq!(config.profile.name, "Ada: Lovelace");
    }

    #[test]
    fn name_with_hash_is_not_cut_at_the_comment() {
        let config = init_with_name("Ada #1 Lovelace");
        assert_eq!(config.profile.name, "Ada #1 Lovelace");
        let profile = config.profile.into_profile().unwrap();
        let target = crate::types::TargetName::derive(&profile.name, crate::types::DEFAULT_SUFFIX);
        assert_eq!(target.as_str(), "ada-#1-lovelace-portfolio");
    }

    #[test]
    fn yaml_lookalike_values_stay_strings() {
        let config = init_with_name("yes");
        assert_eq!(config.profile.name, "yes");
        let config = init_with_name("'quoted' \"both\"");
        assert_eq!(config.profile.name, "'quoted' \"both\"");
    }

    #[test]
    fn multi_line_values_keep_their_lines() {
        let mut config = Config::template();
        config.profile.projects = "Note G - Bernoulli numbers\nDifference Engine - Tables".to_string();
        let yaml = generate_template_yaml(&config).unwrap();
        let reloaded = Config::from_yaml(&yaml).unwrap();
        assert_eq!(reloaded.profile.projects, config.profile.projects);
        assert_eq!(reloaded.profile.email, "ada@example.com");
    }
}
