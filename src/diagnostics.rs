// ABOUTME: Diagnostics accumulator for non-fatal warnings during deployment.
// ABOUTME: Collects warnings that shouldn't fail a deployment but should be shown to users.

/// Collects non-fatal warnings during deployment operations.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!(kind = ?warning.kind, "{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn clear(&mut self) {
        self.warnings.clear();
    }
}

/// A non-fatal warning collected during deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// Create a warning for a hosting step whose failure was ignored.
    pub fn publish_ignored(reason: impl AsRef<str>) -> Self {
        Self {
            kind: WarningKind::PublishIgnored,
            message: format!(
                "enabling GitHub Pages failed, continuing anyway: {}",
                reason.as_ref()
            ),
        }
    }

    /// Create a warning for a probe that got no answer.
    pub fn probe_inconclusive(reason: impl AsRef<str>) -> Self {
        Self {
            kind: WarningKind::ProbeInconclusive,
            message: format!("site not reachable yet: {}", reason.as_ref()),
        }
    }

    /// Create a warning for a site still unreachable past the stall threshold.
    pub fn stalled(elapsed_secs: u64) -> Self {
        Self {
            kind: WarningKind::Stalled,
            message: format!(
                "site still unreachable after {elapsed_secs}s; it may need more time or manual attention"
            ),
        }
    }
}

/// Categories of warnings that can occur during deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Hosting could not be enabled (it may already be on).
    PublishIgnored,
    /// A reachability probe failed or timed out.
    ProbeInconclusive,
    /// Probes keep failing past the stall threshold.
    Stalled,
}
