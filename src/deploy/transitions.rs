// ABOUTME: Pure transition function for the deployment state machine.
// ABOUTME: Consumes the current state and an event; returns the next state or hands it back.

use chrono::{DateTime, Utc};
use std::time::Duration;

use super::error::DeployError;
use super::outcome::StepOutcome;
use super::state::{DeploymentState, Polling, Published};
use crate::types::{SiteUrls, TargetName};

/// On failure the unchanged state comes back alongside the error.
pub type TransitionResult = Result<DeploymentState, (DeploymentState, DeployError)>;

/// Everything that can move a deployment forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Start { target: TargetName },
    Created { repository_url: String },
    Uploaded,
    /// Hosting step finished; `publish` records whether it actually took.
    Configured { urls: SiteUrls, publish: StepOutcome },
    Failed { message: String },
    Tick { interval: Duration },
    ProbeStarted,
    ProbeSucceeded { finished_at: DateTime<Utc> },
    ProbeInconclusive { stall_after: Duration },
    Reset,
    /// The owning session went away.
    Dismiss,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::Start { .. } => "start",
            Event::Created { .. } => "created",
            Event::Uploaded => "uploaded",
            Event::Configured { .. } => "configured",
            Event::Failed { .. } => "failed",
            Event::Tick { .. } => "tick",
            Event::ProbeStarted => "probe_started",
            Event::ProbeSucceeded { .. } => "probe_succeeded",
            Event::ProbeInconclusive { .. } => "probe_inconclusive",
            Event::Reset => "reset",
            Event::Dismiss => "dismiss",
        }
    }
}

impl DeploymentState {
    pub fn next(self, event: Event) -> TransitionResult {
        use DeploymentState as S;

        match (self, event) {
            (S::Idle, Event::Start { target }) => Ok(S::Creating { target }),

            (S::Creating { target }, Event::Created { repository_url }) => Ok(S::Uploading {
                target,
                repository_url,
            }),

            (
                S::Uploading {
                    target,
                    repository_url,
                },
                Event::Uploaded,
            ) => Ok(S::Configuring {
                target,
                repository_url,
            }),

            (S::Configuring { target, .. }, Event::Configured { urls, publish }) => {
                Ok(S::Waiting(Polling {
                    target,
                    urls,
                    elapsed: Duration::ZERO,
                    stalled: false,
                    publish,
                }))
            }

            (
                state @ (S::Creating { .. }
                | S::Uploading { .. }
                | S::Configuring { .. }
                | S::Waiting(_)
                | S::Checking(_)),
                Event::Failed { message },
            ) => {
                let repository_url = state.repository_url().map(str::to_owned);
                Ok(S::Error {
                    message,
                    repository_url,
                })
            }

            // Elapsed time keeps counting while a probe is in flight.
            (S::Waiting(polling), Event::Tick { interval }) => {
                Ok(S::Waiting(polling.advanced(interval)))
            }
            (S::Checking(polling), Event::Tick { interval }) => {
                Ok(S::Checking(polling.advanced(interval)))
            }

            (S::Waiting(polling), Event::ProbeStarted) => Ok(S::Checking(polling)),

            (S::Checking(polling), Event::ProbeSucceeded { finished_at }) => {
                Ok(S::Success(Published {
                    target: polling.target,
                    urls: polling.urls,
                    duration: polling.elapsed,
                    finished_at,
                }))
            }

            (S::Checking(mut polling), Event::ProbeInconclusive { stall_after }) => {
                polling.stalled |= polling.elapsed >= stall_after;
                Ok(S::Waiting(polling))
            }

            (S::Error { .. }, Event::Reset) => Ok(S::Idle),
            (state, Event::Reset) => {
                let status = state.status();
                Err((state, DeployError::NotResettable { status }))
            }

            (_, Event::Dismiss) => Ok(S::Idle),

            (state, event) => {
                let from = state.status();
                Err((
                    state,
                    DeployError::InvalidTransition {
                        from,
                        event: event.name(),
                    },
                ))
            }
        }
    }
}

impl Polling {
    fn advanced(mut self, interval: Duration) -> Self {
        self.elapsed = self.elapsed.saturating_add(interval);
        self
    }
}
