// ABOUTME: Reconciliation of a declared app against Marathon.
// ABOUTME: State parsing, action selection, payload building and deployment waiting.

mod action;
mod clock;
mod error;
mod payload;
mod reconciler;
mod state;
mod waiter;

pub use action::Action;
pub use clock::{Clock, TokioClock};
pub use error::{ReconcileError, ReconcileErrorKind, ValidationError};
pub use payload::{MERGEABLE_FIELDS, build_payload};
pub use reconciler::{Outcome, ReconcileRequest, Reconciler};
pub use state::TargetState;
pub use waiter::{DeploymentWaiter, POLL_INTERVAL};
