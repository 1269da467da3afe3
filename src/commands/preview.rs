// ABOUTME: Offline commands: render the page locally and show where it would be published.
// ABOUTME: Neither touches the network.

use promptfolio::config::Config;
use promptfolio::error::Result;
use promptfolio::output::{Output, OutputMode};
use promptfolio::render::render;
use promptfolio::types::{Identity, SiteUrls, TargetName};
use serde::Serialize;
use std::path::Path;

/// Write the rendered page to `out`.
pub fn render_page(config: &Config, out: &Path, login: Option<&str>, output: &Output) -> Result<()> {
    let profile = config.profile.clone().into_profile()?;
    let identity = Identity::from_login(login.unwrap_or("your-username"));
    let html = render(&profile, &identity);
    std::fs::write(out, &html)?;
    output.success(&format!("Wrote {} ({} bytes)", out.display(), html.len()));
    Ok(())
}

#[derive(Serialize)]
struct StatusReport<'a> {
    target: &'a TargetName,
    #[serde(flatten)]
    urls: &'a SiteUrls,
}

/// Print the derived repository name and both URLs.
pub fn status(config: &Config, login: &str, output: &Output) -> Result<()> {
    let profile = config.profile.clone().into_profile()?;
    let target = TargetName::derive(&profile.name, &config.deployment.target_suffix);
    let urls = SiteUrls::new(login, &target);

    match output.mode() {
        OutputMode::Json => {
            let report = StatusReport {
                target: &target,
                urls: &urls,
            };
            println!("{}", serde_json::to_string(&report).map_err(std::io::Error::other)?);
        }
        OutputMode::Quiet => println!("{}", urls.hosting_url),
        OutputMode::Normal => {
            println!("Repository: {target}");
            println!("Source:     {}", urls.repository_url);
            println!("Site:       {}", urls.hosting_url);
        }
    }
    Ok(())
}
