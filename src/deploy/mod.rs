// ABOUTME: Deployment orchestration as an explicit state machine.
// ABOUTME: Exports the state enum, transition events, probe, ticker and orchestrator.

mod error;
mod orchestrator;
mod outcome;
mod probe;
mod state;
mod ticker;
mod transitions;

pub use error::DeployError;
pub use orchestrator::{CheckOutcome, Orchestrator, TickOutcome};
pub use outcome::StepOutcome;
pub use probe::{HttpProbe, ProbeError, ReachabilityProbe};
pub use state::{DeploymentState, DeploymentStatus, Polling, Published};
pub use ticker::WaitTicker;
pub use transitions::{Event, TransitionResult};
