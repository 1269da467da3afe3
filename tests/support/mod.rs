// ABOUTME: Test support utilities.
// ABOUTME: Provides call-counting mocks for the provisioner, probe, and identity provider.

use async_trait::async_trait;
use parking_lot::Mutex;
use promptfolio::auth::AuthError;
use promptfolio::deploy::{DeploymentState, DeploymentStatus, ProbeError, ReachabilityProbe};
use promptfolio::form::ProfileForm;
use promptfolio::github::{
    IdentityProvider, Operation, ProvisionError, Provisioner, Session, TargetHandle,
};
use promptfolio::types::{Credential, Identity, Profile, TargetName};
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Once;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Notify, watch};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter =
            EnvFilter::from_default_env().add_directive("promptfolio=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

#[allow(dead_code)]
pub fn ada() -> Profile {
    ProfileForm {
        name: "Ada Lovelace".to_string(),
        email: "a@b.com".to_string(),
        ..ProfileForm::default()
    }
    .into_profile()
    .unwrap()
}

#[allow(dead_code)]
pub fn ada_identity() -> Identity {
    Identity::from_login("ada")
}

#[allow(dead_code)]
pub fn token() -> Credential {
    Credential::new("gho_test")
}

/// One recorded provisioning call and the deployment status seen while it ran.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(dead_code)]
pub struct ProvisionCall {
    pub operation: Operation,
    pub target: String,
    pub observed: Option<DeploymentStatus>,
}

/// Provisioner that records calls and fails the operations it is told to.
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct MockProvisioner {
    calls: Arc<Mutex<Vec<ProvisionCall>>>,
    uploads: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
    failures: Arc<Mutex<Vec<(Operation, u16, String)>>>,
    gates: Arc<Mutex<Vec<(Operation, Arc<Notify>)>>>,
    observer: Arc<Mutex<Option<watch::Receiver<DeploymentState>>>>,
}

#[allow(dead_code)]
impl MockProvisioner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject `operation` with `status` and a provider error body.
    pub fn failing(self, operation: Operation, status: u16, body: &str) -> Self {
        self.failures
            .lock()
            .push((operation, status, body.to_string()));
        self
    }

    /// Hold `operation` after it is recorded until `gate` is notified.
    pub fn gated(self, operation: Operation, gate: Arc<Notify>) -> Self {
        self.gates.lock().push((operation, gate));
        self
    }

    /// Record the deployment status seen by each call.
    pub fn observe(&self, updates: watch::Receiver<DeploymentState>) {
        *self.observer.lock() = Some(updates);
    }

    pub fn calls(&self) -> Vec<ProvisionCall> {
        self.calls.lock().clone()
    }

    pub fn operations(&self) -> Vec<Operation> {
        self.calls.lock().iter().map(|c| c.operation).collect()
    }

    pub fn uploads(&self) -> Vec<(String, Vec<u8>)> {
        self.uploads.lock().clone()
    }

    fn record(&self, operation: Operation, target: &TargetName) -> Result<(), ProvisionError> {
        let observed = self
            .observer
            .lock()
            .as_ref()
            .map(|rx| rx.borrow().status());
        self.calls.lock().push(ProvisionCall {
            operation,
            target: target.to_string(),
            observed,
        });

        let failures = self.failures.lock();
        match failures.iter().find(|(op, _, _)| *op == operation) {
            Some((op, status, body)) => {
                let status = StatusCode::from_u16(*status).unwrap();
                Err(ProvisionError::rejected(*op, status, body))
            }
            None => Ok(()),
        }
    }

    async fn pass_gate(&self, operation: Operation) {
        let gate = self
            .gates
            .lock()
            .iter()
            .find(|(op, _)| *op == operation)
            .map(|(_, gate)| Arc::clone(gate));
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl Provisioner for MockProvisioner {
    async fn create_target(
        &self,
        _credential: &Credential,
        name: &TargetName,
        _description: &str,
    ) -> Result<TargetHandle, ProvisionError> {
        self.record(Operation::CreateRepository, name)?;
        self.pass_gate(Operation::CreateRepository).await;
        Ok(TargetHandle {
            name: name.to_string(),
            full_name: format!("ada/{name}"),
            html_url: format!("https://github.com/ada/{name}"),
            default_branch: Some("main".to_string()),
        })
    }

    async fn upload_content(
        &self,
        _credential: &Credential,
        _owner: &str,
        name: &TargetName,
        path: &str,
        content: &[u8],
        _message: &str,
    ) -> Result<(), ProvisionError> {
        self.record(Operation::UploadContent, name)?;
        self.pass_gate(Operation::UploadContent).await;
        self.uploads.lock().push((path.to_string(), content.to_vec()));
        Ok(())
    }

    async fn enable_publishing(
        &self,
        _credential: &Credential,
        _owner: &str,
        name: &TargetName,
        _branch: &str,
        _path: &str,
    ) -> Result<(), ProvisionError> {
        self.record(Operation::EnablePages, name)?;
        self.pass_gate(Operation::EnablePages).await;
        Ok(())
    }
}

/// What a probe call does.
#[derive(Clone)]
#[allow(dead_code)]
pub enum ProbeStep {
    Ready,
    Unreachable,
    /// Wait for a permit, then report ready.
    Gated(Arc<Notify>),
}

/// Probe that follows a script, then repeats a fallback step.
#[derive(Clone)]
#[allow(dead_code)]
pub struct MockProbe {
    calls: Arc<AtomicUsize>,
    script: Arc<Mutex<VecDeque<ProbeStep>>>,
    fallback: ProbeStep,
}

#[allow(dead_code)]
impl MockProbe {
    pub fn always(step: ProbeStep) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            script: Arc::new(Mutex::new(VecDeque::new())),
            fallback: step,
        }
    }

    pub fn ready() -> Self {
        Self::always(ProbeStep::Ready)
    }

    pub fn unreachable() -> Self {
        Self::always(ProbeStep::Unreachable)
    }

    /// Never answers until `gate` is notified.
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self::always(ProbeStep::Gated(gate))
    }

    pub fn then(self, steps: impl IntoIterator<Item = ProbeStep>) -> Self {
        self.script.lock().extend(steps);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReachabilityProbe for MockProbe {
    async fn probe(&self, url: &str) -> Result<(), ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self
            .script
            .lock()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        match step {
            ProbeStep::Ready => Ok(()),
            ProbeStep::Unreachable => Err(ProbeError::Unreachable(format!("{url}: refused"))),
            ProbeStep::Gated(gate) => {
                gate.notified().await;
                Ok(())
            }
        }
    }
}

/// Identity provider that hands out a fixed session and counts exchanges.
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct MockIdentityProvider {
    exchanges: Arc<AtomicUsize>,
    codes: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockIdentityProvider {
    pub fn exchanges(&self) -> usize {
        self.exchanges.load(Ordering::SeqCst)
    }

    pub fn codes(&self) -> Vec<String> {
        self.codes.lock().clone()
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    fn authorize_url(&self, state: &str) -> String {
        format!("https://github.test/login/oauth/authorize?state={state}")
    }

    async fn exchange(&self, code: &str) -> Result<Session, AuthError> {
        self.exchanges.fetch_add(1, Ordering::SeqCst);
        self.codes.lock().push(code.to_string());
        if code == "expired" {
            return Err(AuthError::Provider(
                "The code passed is incorrect or expired.".to_string(),
            ));
        }
        Ok(Session {
            credential: token(),
            identity: ada_identity(),
        })
    }

    async fn identity(&self, _credential: &Credential) -> Result<Identity, AuthError> {
        Ok(ada_identity())
    }
}
