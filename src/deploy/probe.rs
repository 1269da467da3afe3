// ABOUTME: Reachability probe for the published site.
// ABOUTME: Any HTTP response within the timeout counts as reachable.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("no response within {}s", .0.as_secs())]
    TimedOut(Duration),

    #[error("site unreachable: {0}")]
    Unreachable(String),
}

#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    async fn probe(&self, url: &str) -> Result<(), ProbeError>;
}

/// Sends a `HEAD` request and reports whether anything answered.
///
/// The status code is not inspected: a 404 from the hosting edge still
/// counts as reachable.
pub struct HttpProbe {
    http: reqwest::Client,
    timeout: Duration,
}

impl HttpProbe {
    pub fn new(http: reqwest::Client, timeout: Duration) -> Self {
        Self { http, timeout }
    }
}

#[async_trait]
impl ReachabilityProbe for HttpProbe {
    async fn probe(&self, url: &str) -> Result<(), ProbeError> {
        // Dropping the request future on timeout cancels it.
        match tokio::time::timeout(self.timeout, self.http.head(url).send()).await {
            Ok(Ok(response)) => {
                debug!(url, status = %response.status(), "site answered");
                Ok(())
            }
            Ok(Err(e)) => Err(ProbeError::Unreachable(e.to_string())),
            Err(_) => Err(ProbeError::TimedOut(self.timeout)),
        }
    }
}
