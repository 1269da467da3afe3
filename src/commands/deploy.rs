// ABOUTME: Deploy command implementation.
// ABOUTME: Runs the orchestrator, reports progress, and handles Enter and Ctrl-C while waiting.

use promptfolio::config::Config;
use promptfolio::deploy::{DeploymentState, HttpProbe, Orchestrator};
use promptfolio::diagnostics::WarningKind;
use promptfolio::error::{Error, Result};
use promptfolio::github::{self, GitHubClient, fetch_identity};
use promptfolio::output::{Output, step_index};
use promptfolio::types::{Credential, Identity, Profile};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// Seconds between repeated "still waiting" lines.
const REPORT_EVERY_SECS: u64 = 15;

/// Deploy using a token read from the environment.
pub async fn deploy_with_token(config: Config, token_env: &str, output: Output) -> Result<()> {
    let token = std::env::var(token_env)
        .ok()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| Error::MissingEnvVar(token_env.to_string()))?;
    let credential = Credential::new(token);

    let profile = config.profile.clone().into_profile()?;
    let http = github::http_client(&config.github.user_agent)?;
    let identity = fetch_identity(&http, &config.github.api_url, &credential).await?;

    run_deployment(&config, &profile, &identity, &credential, http, output).await
}

/// Drive one deployment to a terminal state, or until interrupted.
pub async fn run_deployment(
    config: &Config,
    profile: &Profile,
    identity: &Identity,
    credential: &Credential,
    http: reqwest::Client,
    mut output: Output,
) -> Result<()> {
    output.start_timer();
    output.progress(&format!(
        "Deploying portfolio for {} to {}",
        profile.name, identity.login
    ));

    let provisioner = GitHubClient::new(http.clone(), &config.github.api_url);
    let probe = HttpProbe::new(http, config.deployment.probe_timeout);
    let orchestrator = Orchestrator::new(provisioner, probe, config.deployment.clone());
    let mut updates = orchestrator.subscribe();
    let mut reporter = Reporter::new(&output);

    let start = orchestrator.start(profile, identity, credential);
    tokio::pin!(start);
    loop {
        tokio::select! {
            result = &mut start => {
                result?;
                break;
            }
            Ok(()) = updates.changed() => {
                let state = updates.borrow_and_update().clone();
                reporter.show(&state);
            }
            _ = tokio::signal::ctrl_c() => {
                return Err(interrupt(&orchestrator, &output));
            }
        }
    }

    if orchestrator.state().polling().is_some() {
        output.progress("Press Enter to check now, Ctrl-C to stop waiting.");
    }

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        let state = updates.borrow_and_update().clone();
        reporter.show(&state);

        match state {
            DeploymentState::Success(published) => {
                report_warnings(&orchestrator, &output);
                orchestrator.close();
                output.summary(&published);
                return Ok(());
            }
            DeploymentState::Error { message, .. } => {
                orchestrator.close();
                return Err(Error::DeploymentFailed(message));
            }
            _ => {}
        }

        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    return Err(Error::DeploymentFailed("deployment state channel closed".to_string()));
                }
            }
            line = stdin.next_line(), if stdin_open => match line {
                Ok(Some(_)) => {
                    debug!("manual status check requested");
                    let orchestrator = orchestrator.clone();
                    tokio::spawn(async move {
                        orchestrator.check_status().await;
                    });
                }
                Ok(None) | Err(_) => stdin_open = false,
            },
            _ = tokio::signal::ctrl_c() => {
                return Err(interrupt(&orchestrator, &output));
            }
        }
    }
}

/// Close the session and describe where it stopped.
fn interrupt<P, R>(orchestrator: &Orchestrator<P, R>, output: &Output) -> Error
where
    P: github::Provisioner + 'static,
    R: promptfolio::deploy::ReachabilityProbe + 'static,
{
    let state = orchestrator.state();
    orchestrator.close();
    report_warnings(orchestrator, output);
    match state.hosting_url() {
        Some(url) => Error::Interrupted(url.to_string()),
        None => Error::InterruptedProvisioning(state.status()),
    }
}

fn report_warnings<P, R>(orchestrator: &Orchestrator<P, R>, output: &Output)
where
    P: github::Provisioner + 'static,
    R: promptfolio::deploy::ReachabilityProbe + 'static,
{
    let warnings = orchestrator.warnings();
    let failed_probes = warnings
        .iter()
        .filter(|w| w.kind == WarningKind::ProbeInconclusive)
        .count();
    for warning in warnings
        .iter()
        .filter(|w| w.kind != WarningKind::ProbeInconclusive)
    {
        output.warning(&warning.message);
    }
    if failed_probes > 0 {
        debug!(failed_probes, "site checks without an answer");
    }
}

/// Prints a line when the step changes, and periodically while waiting.
struct Reporter<'a> {
    output: &'a Output,
    last: Option<(Option<usize>, bool)>,
    last_elapsed: Option<u64>,
}

impl<'a> Reporter<'a> {
    fn new(output: &'a Output) -> Self {
        Self {
            output,
            last: None,
            last_elapsed: None,
        }
    }

    fn show(&mut self, state: &DeploymentState) {
        let key = (step_index(state.status()), state.is_stalled());
        let elapsed = state.elapsed().map(|d| d.as_secs());
        let periodic = match elapsed {
            Some(secs) => secs % REPORT_EVERY_SECS == 0 && self.last_elapsed != Some(secs),
            None => false,
        };
        if self.last == Some(key) && !periodic {
            return;
        }
        self.last = Some(key);
        self.last_elapsed = elapsed;
        self.output.state(state);
    }
}
