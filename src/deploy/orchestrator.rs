// ABOUTME: Drives a deployment through provisioning, waiting, and reachability checks.
// ABOUTME: Owns the state, the wait ticker, and a session epoch that fences late responses.

use chrono::Utc;
use parking_lot::Mutex;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::error::DeployError;
use super::outcome::StepOutcome;
use super::probe::ReachabilityProbe;
use super::state::DeploymentState;
use super::ticker::WaitTicker;
use super::transitions::Event;
use crate::config::DeploymentConfig;
use crate::diagnostics::{Diagnostics, Warning};
use crate::github::Provisioner;
use crate::render::render;
use crate::types::{Credential, Identity, Profile, SiteUrls, TargetName, repository_url};

/// Result of asking for a status check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Not waiting, or a probe is already in flight. Nothing happened.
    Skipped,
    /// Site answered; deployment succeeded.
    Ready,
    /// No answer yet; back to waiting.
    Pending { stalled: bool },
    /// The session closed while the probe was in flight.
    Discarded,
}

/// Result of one tick of the wait timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not in a waiting phase; the timer should stop.
    Stopped,
    Counted { elapsed: Duration, probe_due: bool },
}

/// Handle to a single deployment. Cheap to clone; clones share state.
pub struct Orchestrator<P, R> {
    shared: Arc<Shared<P, R>>,
}

impl<P, R> Clone for Orchestrator<P, R> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

struct Shared<P, R> {
    provisioner: P,
    probe: R,
    settings: DeploymentConfig,
    state: Mutex<DeploymentState>,
    /// Bumped on close and reset. Work started under an older value is discarded.
    session: AtomicU64,
    ticker: Mutex<Option<WaitTicker>>,
    updates: watch::Sender<DeploymentState>,
    diagnostics: Mutex<Diagnostics>,
}

impl<P, R> Shared<P, R> {
    /// Run one transition in place and publish the result. Caller holds the state lock.
    fn apply(&self, state: &mut DeploymentState, event: Event) -> Result<(), DeployError> {
        let current = std::mem::replace(state, DeploymentState::Idle);
        let from = current.status();
        match current.next(event) {
            Ok(next) => {
                let to = next.status();
                if from != to {
                    info!(%from, %to, "deployment state changed");
                }
                *state = next;
                self.updates.send_replace(state.clone());
                Ok(())
            }
            Err((unchanged, e)) => {
                *state = unchanged;
                Err(e)
            }
        }
    }

    fn current_session(&self) -> u64 {
        self.session.load(Ordering::SeqCst)
    }

    fn end_session(&self) {
        self.session.fetch_add(1, Ordering::SeqCst);
    }

    fn release_ticker(&self) {
        let ticker = self.ticker.lock().take();
        if ticker.is_some() {
            debug!("wait ticker stopped");
        }
        drop(ticker);
    }
}

impl<P, R> Orchestrator<P, R>
where
    P: Provisioner + 'static,
    R: ReachabilityProbe + 'static,
{
    pub fn new(provisioner: P, probe: R, settings: DeploymentConfig) -> Self {
        let (updates, _) = watch::channel(DeploymentState::Idle);
        Self {
            shared: Arc::new(Shared {
                provisioner,
                probe,
                settings,
                state: Mutex::new(DeploymentState::Idle),
                session: AtomicU64::new(0),
                ticker: Mutex::new(None),
                updates,
                diagnostics: Mutex::new(Diagnostics::default()),
            }),
        }
    }

    pub fn state(&self) -> DeploymentState {
        self.shared.state.lock().clone()
    }

    /// Receives every state the deployment passes through, latest value first.
    pub fn subscribe(&self) -> watch::Receiver<DeploymentState> {
        self.shared.updates.subscribe()
    }

    pub fn settings(&self) -> &DeploymentConfig {
        &self.shared.settings
    }

    pub fn warnings(&self) -> Vec<Warning> {
        self.shared.diagnostics.lock().warnings().to_vec()
    }

    /// Provision the site and enter the waiting phase.
    ///
    /// Remote failures land in the `Error` state and are returned as `Ok`.
    /// `Err` means the call itself was invalid: a bad profile, a deployment
    /// already under way, or a session closed mid-flight.
    pub async fn start(
        &self,
        profile: &Profile,
        identity: &Identity,
        credential: &Credential,
    ) -> Result<DeploymentState, DeployError> {
        profile.validate()?;

        let settings = &self.shared.settings;
        let target = TargetName::derive(&profile.name, &settings.target_suffix);
        let owner = identity.login.as_str();

        let session = {
            let mut state = self.shared.state.lock();
            if !matches!(*state, DeploymentState::Idle) {
                return Err(DeployError::AlreadyStarted {
                    status: state.status(),
                });
            }
            self.shared.diagnostics.lock().clear();
            self.shared.apply(
                &mut state,
                Event::Start {
                    target: target.clone(),
                },
            )?;
            self.shared.current_session()
        };

        info!(target = %target, owner, "deploying portfolio");
        let content = render(profile, identity);
        let description = format!("Portfolio website for {}", profile.name);

        let created = StepOutcome::required(
            self.shared
                .provisioner
                .create_target(credential, &target, &description)
                .await,
        );
        if let Some(reason) = created.reason() {
            return self.fail(session, reason);
        }
        self.advance(
            session,
            Event::Created {
                repository_url: repository_url(owner, &target),
            },
        )?;

        let uploaded = StepOutcome::required(
            self.shared
                .provisioner
                .upload_content(
                    credential,
                    owner,
                    &target,
                    &settings.content_path,
                    &content,
                    &settings.commit_message,
                )
                .await,
        );
        if let Some(reason) = uploaded.reason() {
            return self.fail(session, reason);
        }
        self.advance(session, Event::Uploaded)?;

        let publish = StepOutcome::best_effort(
            self.shared
                .provisioner
                .enable_publishing(
                    credential,
                    owner,
                    &target,
                    &settings.branch,
                    &settings.publish_path,
                )
                .await,
        );
        if let Some(reason) = publish.reason() {
            self.shared
                .diagnostics
                .lock()
                .warn(Warning::publish_ignored(reason));
        }

        let state = self.advance(
            session,
            Event::Configured {
                urls: SiteUrls::new(owner, &target),
                publish,
            },
        )?;
        self.start_ticker();
        Ok(state)
    }

    /// Probe the site once, if waiting with no probe in flight.
    ///
    /// Usable before the grace period has passed; that is the manual check.
    pub async fn check_status(&self) -> CheckOutcome {
        let (session, url) = {
            let mut state = self.shared.state.lock();
            let url = match &*state {
                DeploymentState::Waiting(polling) => polling.urls.hosting_url.clone(),
                other => {
                    debug!(status = %other.status(), "status check skipped");
                    return CheckOutcome::Skipped;
                }
            };
            if self.shared.apply(&mut state, Event::ProbeStarted).is_err() {
                return CheckOutcome::Skipped;
            }
            (self.shared.current_session(), url)
        };

        debug!(url, "probing site");
        let result = self.shared.probe.probe(&url).await;

        let outcome = {
            let mut state = self.shared.state.lock();
            if self.shared.current_session() != session {
                debug!(url, "probe finished after session closed; ignoring");
                return CheckOutcome::Discarded;
            }

            match result {
                Ok(()) => {
                    let event = Event::ProbeSucceeded {
                        finished_at: Utc::now(),
                    };
                    match self.shared.apply(&mut state, event) {
                        Ok(()) => CheckOutcome::Ready,
                        Err(e) => {
                            warn!(error = %e, "probe result could not be applied");
                            return CheckOutcome::Discarded;
                        }
                    }
                }
                Err(e) => {
                    let was_stalled = state.is_stalled();
                    let event = Event::ProbeInconclusive {
                        stall_after: self.shared.settings.stall_after,
                    };
                    if let Err(e) = self.shared.apply(&mut state, event) {
                        warn!(error = %e, "probe result could not be applied");
                        return CheckOutcome::Discarded;
                    }
                    let stalled = state.is_stalled();
                    let mut diagnostics = self.shared.diagnostics.lock();
                    diagnostics.warn(Warning::probe_inconclusive(e.to_string()));
                    if stalled && !was_stalled {
                        let elapsed = state.elapsed().unwrap_or_default().as_secs();
                        diagnostics.warn(Warning::stalled(elapsed));
                    }
                    CheckOutcome::Pending { stalled }
                }
            }
        };

        if outcome == CheckOutcome::Ready {
            info!(url, "site is live");
            self.shared.release_ticker();
        }
        outcome
    }

    /// Advance the wait timer by one interval.
    pub fn tick(&self) -> TickOutcome {
        let mut state = self.shared.state.lock();
        if state.polling().is_none() {
            return TickOutcome::Stopped;
        }
        let interval = self.shared.settings.tick_interval;
        if self
            .shared
            .apply(&mut state, Event::Tick { interval })
            .is_err()
        {
            return TickOutcome::Stopped;
        }
        TickOutcome::Counted {
            elapsed: state.elapsed().unwrap_or_default(),
            probe_due: state.probe_due(self.shared.settings.grace_period),
        }
    }

    /// Return to `Idle` after a failure so a new deployment can start.
    pub fn reset(&self) -> Result<(), DeployError> {
        let mut state = self.shared.state.lock();
        self.shared.apply(&mut state, Event::Reset)?;
        self.shared.end_session();
        Ok(())
    }

    /// End the session: stop the timer and discard anything still in flight.
    pub fn close(&self) {
        self.shared.end_session();
        self.shared.release_ticker();
        let mut state = self.shared.state.lock();
        // Dismiss is valid from every state.
        let _ = self.shared.apply(&mut state, Event::Dismiss);
        debug!("deployment session closed");
    }

    fn advance(&self, session: u64, event: Event) -> Result<DeploymentState, DeployError> {
        let mut state = self.shared.state.lock();
        if self.shared.current_session() != session {
            return Err(DeployError::Closed);
        }
        self.shared.apply(&mut state, event)?;
        Ok(state.clone())
    }

    fn fail(&self, session: u64, reason: &str) -> Result<DeploymentState, DeployError> {
        warn!(reason, "deployment failed");
        self.advance(
            session,
            Event::Failed {
                message: reason.to_string(),
            },
        )
    }

    fn start_ticker(&self) {
        let weak: Weak<Shared<P, R>> = Arc::downgrade(&self.shared);
        let ticker = WaitTicker::spawn(self.shared.settings.tick_interval, move || {
            let Some(shared) = weak.upgrade() else {
                return ControlFlow::Break(());
            };
            let orchestrator = Orchestrator { shared };
            match orchestrator.tick() {
                TickOutcome::Stopped => ControlFlow::Break(()),
                TickOutcome::Counted {
                    probe_due: true, ..
                } => {
                    tokio::spawn(async move {
                        orchestrator.check_status().await;
                    });
                    ControlFlow::Continue(())
                }
                TickOutcome::Counted { .. } => ControlFlow::Continue(()),
            }
        });
        *self.shared.ticker.lock() = Some(ticker);
    }
}
