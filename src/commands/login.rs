// ABOUTME: Login and callback commands: the two halves of the OAuth redirect.
// ABOUTME: Callback verifies the nonce, exchanges the code, then deploys the saved profile.

use super::deploy::run_deployment;
use promptfolio::auth::{FileStore, begin_authorization, complete_authorization};
use promptfolio::config::Config;
use promptfolio::error::Result;
use promptfolio::github::{self, GitHubOAuth, Session};
use promptfolio::output::Output;

fn provider(config: &Config, http: reqwest::Client) -> Result<GitHubOAuth> {
    let app = config.github.oauth_app()?;
    Ok(GitHubOAuth::new(
        http,
        app,
        &config.github.oauth_url,
        &config.github.api_url,
    ))
}

/// Store a nonce and the profile, then print the authorization URL.
pub fn login(config: &Config, output: &Output) -> Result<()> {
    let profile = config.profile.clone().into_profile()?;
    let http = github::http_client(&config.github.user_agent)?;
    let provider = provider(config, http)?;
    let store = FileStore::in_dir(&config.state_dir()?);

    let url = begin_authorization(&store, &provider, &profile)?;
    output.progress("Open this URL in a browser to authorize PromptFolio:");
    output.success(&url);
    output.progress("Then run `promptfolio callback --code <code> --state <state>` with the values from the redirect.");
    Ok(())
}

/// Complete authorization and deploy with the resulting credential.
pub async fn callback(config: Config, code: &str, state: &str, output: Output) -> Result<()> {
    let http = github::http_client(&config.github.user_agent)?;
    let provider = provider(&config, http.clone())?;
    let store = FileStore::in_dir(&config.state_dir()?);

    let authorized = complete_authorization(&store, &provider, code, state).await?;

    let profile = match authorized.pending {
        Some(pending) => pending.profile,
        None => {
            output.warning("no saved profile from login; using the one in promptfolio.yml");
            config.profile.clone().into_profile()?
        }
    };
    let Session {
        credential,
        identity,
    } = authorized.session;

    run_deployment(&config, &profile, &identity, &credential, http, output).await
}
