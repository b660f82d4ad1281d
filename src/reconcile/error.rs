// ABOUTME: Reconciliation error types with SNAFU pattern.
// ABOUTME: One structured failure per run, with a kind for programmatic handling.

use snafu::Snafu;
use std::time::Duration;

use super::state::TargetState;
use crate::marathon::{ApiError, TransportError};
use crate::types::DeploymentId;

/// Input rejected before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("unknown state '{0}': expected one of present, absent, restart, kill")]
    UnknownState(String),

    #[error("operation {state} requires the following missing parameters: {}", .params.join(","))]
    MissingParameters {
        state: TargetState,
        params: Vec<&'static str>,
    },
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ReconcileError {
    #[snafu(display("{source}"))]
    Validation { source: ValidationError },

    #[snafu(display("{operation} failed with HTTP {status}: {message}"))]
    Orchestrator {
        operation: &'static str,
        status: u16,
        message: String,
    },

    #[snafu(display("{operation} returned an unexpected response: {reason}"))]
    InvalidResponse {
        operation: &'static str,
        reason: String,
    },

    #[snafu(display("{operation} failed: {source}"))]
    Transport {
        operation: &'static str,
        source: TransportError,
    },

    #[snafu(display(
        "timeout waiting for deployment {deployment_id} after {}s",
        elapsed.as_secs()
    ))]
    DeploymentTimeout {
        deployment_id: DeploymentId,
        elapsed: Duration,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileErrorKind {
    /// Missing parameter or unknown state; nothing was sent.
    Validation,
    /// Marathon rejected a call or answered with something unusable.
    Orchestrator,
    /// Marathon could not be reached.
    Transport,
    /// The change was accepted but its deployment did not finish in time.
    DeploymentTimeout,
}

impl ReconcileError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> ReconcileErrorKind {
        match self {
            ReconcileError::Validation { .. } => ReconcileErrorKind::Validation,
            ReconcileError::Orchestrator { .. } | ReconcileError::InvalidResponse { .. } => {
                ReconcileErrorKind::Orchestrator
            }
            ReconcileError::Transport { .. } => ReconcileErrorKind::Transport,
            ReconcileError::DeploymentTimeout { .. } => ReconcileErrorKind::DeploymentTimeout,
        }
    }

    /// HTTP status of the rejected call, if Marathon answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ReconcileError::Orchestrator { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn from_api(operation: &'static str, err: ApiError) -> Self {
        match err {
            ApiError::Status { status, message } => ReconcileError::Orchestrator {
                operation,
                status,
                message,
            },
            ApiError::UnexpectedBody(reason) => {
                ReconcileError::InvalidResponse { operation, reason }
            }
            ApiError::Transport(source) => ReconcileError::Transport { operation, source },
        }
    }
}

impl From<ValidationError> for ReconcileError {
    fn from(source: ValidationError) -> Self {
        ReconcileError::Validation { source }
    }
}
