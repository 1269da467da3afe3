// ABOUTME: Public URLs computed from the owner login and repository name.
// ABOUTME: Hosting URL is the GitHub Pages address; repository URL is the github.com page.

use serde::Serialize;

use super::TargetName;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteUrls {
    pub hosting_url: String,
    pub repository_url: String,
}

impl SiteUrls {
    pub fn new(login: &str, target: &TargetName) -> Self {
        Self {
            hosting_url: hosting_url(login, target),
            repository_url: repository_url(login, target),
        }
    }
}

pub fn hosting_url(login: &str, target: &TargetName) -> String {
    format!("https://{login}.github.io/{target}")
}

pub fn repository_url(login: &str, target: &TargetName) -> String {
    format!("https://github.com/{login}/{target}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_use_login_and_target() {
        let target = TargetName::derive("Ada Lovelace", "portfolio");
        let urls = SiteUrls::new("ada", &target);
        assert_eq!(urls.hosting_url, "https://ada.github.io/ada-lovelace-portfolio");
        assert_eq!(
            urls.repository_url,
            "https://github.com/ada/ada-lovelace-portfolio"
        );
    }
}
