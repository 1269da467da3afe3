// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal, quiet (CI), and JSON output modes.

use serde::Serialize;
use std::time::{Duration, Instant};

use crate::deploy::{DeploymentState, DeploymentStatus, Published};

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Minimal output for CI (only final result)
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// One line of the deployment progress list.
#[derive(Debug, Clone, Copy)]
pub struct Step {
    pub label: &'static str,
    pub description: &'static str,
}

pub const STEPS: [Step; 5] = [
    Step {
        label: "Creating repository",
        description: "Setting up your portfolio repository",
    },
    Step {
        label: "Uploading files",
        description: "Generating and uploading portfolio HTML",
    },
    Step {
        label: "Configuring Pages",
        description: "Enabling GitHub Pages hosting",
    },
    Step {
        label: "Waiting for deployment",
        description: "GitHub Pages is building your site",
    },
    Step {
        label: "Site is live",
        description: "Your portfolio is now accessible",
    },
];

/// Position of a status in [`STEPS`]. `Idle` and `Error` have none.
pub fn step_index(status: DeploymentStatus) -> Option<usize> {
    match status {
        DeploymentStatus::Creating => Some(0),
        DeploymentStatus::Uploading => Some(1),
        DeploymentStatus::Configuring => Some(2),
        DeploymentStatus::Waiting | DeploymentStatus::Checking => Some(3),
        DeploymentStatus::Success => Some(4),
        DeploymentStatus::Idle | DeploymentStatus::Error => None,
    }
}

/// Format whole seconds as `m:ss`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Print a progress message (suppressed in quiet/json mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Print a success message with optional timing.
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => {
                let elapsed = self.elapsed_secs();
                if elapsed > 0.0 {
                    println!("{message} ({:.1}s)", elapsed);
                } else {
                    println!("{message}");
                }
            }
            OutputMode::Quiet => {
                // Print only the essential result
                println!("{message}");
            }
            OutputMode::Json => self.emit_message("success", message, false),
        }
    }

    /// Print a non-fatal warning.
    pub fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => eprintln!("Warning: {message}"),
            OutputMode::Quiet => {}
            OutputMode::Json => self.emit_message("warning", message, true),
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                eprintln!("Error: {message}");
            }
            OutputMode::Json => self.emit_message("error", message, true),
        }
    }

    /// Report a deployment state change.
    pub fn state(&self, state: &DeploymentState) {
        match self.mode {
            OutputMode::Normal => {
                if let Some(line) = describe_state(state) {
                    println!("{line}");
                }
            }
            OutputMode::Quiet => {}
            OutputMode::Json => {
                let event = JsonState {
                    event: "state",
                    state,
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    println!("{json}");
                }
            }
        }
    }

    /// Print the final summary of a published site.
    pub fn summary(&self, published: &Published) {
        match self.mode {
            OutputMode::Normal => {
                println!();
                println!(
                    "Deployment completed in {}",
                    format_elapsed(published.duration)
                );
                println!("  Repository: {}", published.target);
                println!("  Source:     {}", published.urls.repository_url);
                println!("  Live site:  {}", published.urls.hosting_url);
                println!(
                    "  Finished:   {}",
                    published.finished_at.format("%Y-%m-%d %H:%M:%S UTC")
                );
            }
            OutputMode::Quiet => println!("{}", published.urls.hosting_url),
            OutputMode::Json => {
                let event = JsonSummary {
                    event: "published",
                    published,
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    println!("{json}");
                }
            }
        }
    }

    fn emit_message(&self, event: &str, message: &str, to_stderr: bool) {
        let event = JsonEvent {
            event,
            message,
            duration_secs: if self.start_time.is_some() {
                Some(self.elapsed_secs())
            } else {
                None
            },
        };
        if let Ok(json) = serde_json::to_string(&event) {
            if to_stderr {
                eprintln!("{json}");
            } else {
                println!("{json}");
            }
        }
    }
}

/// Human-readable line for a state, or `None` when there is nothing to say.
pub fn describe_state(state: &DeploymentState) -> Option<String> {
    match state {
        DeploymentState::Idle => None,
        DeploymentState::Waiting(polling) | DeploymentState::Checking(polling) => {
            let step = STEPS[3];
            let mut line = format!(
                "[4/5] {} {} ({})",
                step.label,
                format_elapsed(polling.elapsed),
                polling.urls.hosting_url
            );
            if state.is_checking() {
                line.push_str(" checking...");
            }
            if polling.stalled {
                line.push_str(" still unreachable, press Enter to retry");
            }
            Some(line)
        }
        DeploymentState::Error { message, .. } => Some(format!("Deployment failed: {message}")),
        other => {
            let index = step_index(other.status())?;
            let step = STEPS[index];
            Some(format!(
                "[{}/{}] {}: {}",
                index + 1,
                STEPS.len(),
                step.label,
                step.description
            ))
        }
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}

#[derive(Serialize)]
struct JsonState<'a> {
    event: &'a str,
    state: &'a DeploymentState,
}

#[derive(Serialize)]
struct JsonSummary<'a> {
    event: &'a str,
    #[serde(flatten)]
    published: &'a Published,
}
