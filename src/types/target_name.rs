// ABOUTME: Repository name derived from the profile owner's name.
// ABOUTME: Lower-cases, collapses whitespace runs into hyphens, appends a suffix.

use serde::Serialize;
use std::fmt;

/// Suffix appended to every derived repository name.
pub const DEFAULT_SUFFIX: &str = "portfolio";

/// Lower-case `name` and replace each run of whitespace with a single hyphen.
///
/// Leading and trailing whitespace become hyphens too; applying the function
/// to its own output returns the same string.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.extend(c.to_lowercase());
            in_whitespace = false;
        }
    }
    slug
}

/// Name of the repository that hosts a portfolio.
///
/// Deterministic for a given profile name, but not unique: two people with
/// the same name on the same account collide on creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TargetName(String);

impl TargetName {
    pub fn derive(profile_name: &str, suffix: &str) -> Self {
        Self(format!("{}-{}", slugify(profile_name), suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_from_two_word_name() {
        let target = TargetName::derive("Ada Lovelace", DEFAULT_SUFFIX);
        assert_eq!(target.as_str(), "ada-lovelace-portfolio");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(slugify("Grace \t Brewster  Hopper"), "grace-brewster-hopper");
    }

    #[test]
    fn keeps_edge_whitespace_as_hyphens() {
        assert_eq!(slugify(" Ada "), "-ada-");
    }
}
