// ABOUTME: Tri-state result of a provisioning step: completed, ignored, or failed.
// ABOUTME: Best-effort steps record their failure instead of silently discarding it.

use serde::Serialize;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome<T = ()> {
    Completed(T),
    /// The step failed but the deployment carries on.
    Ignored { reason: String },
    /// The step failed and the deployment stops.
    Failed { reason: String },
}

impl<T> StepOutcome<T> {
    /// A step whose failure ends the deployment.
    pub fn required<E: Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => StepOutcome::Completed(value),
            Err(e) => StepOutcome::Failed {
                reason: e.to_string(),
            },
        }
    }

    /// A step whose failure is recorded and then ignored.
    pub fn best_effort<E: Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => StepOutcome::Completed(value),
            Err(e) => StepOutcome::Ignored {
                reason: e.to_string(),
            },
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            StepOutcome::Completed(_) => None,
            StepOutcome::Ignored { reason } | StepOutcome::Failed { reason } => Some(reason),
        }
    }
}
