// ABOUTME: Blocks until a Marathon deployment leaves the active list or a deadline passes.
// ABOUTME: Poll failures are transient; only the deadline ends the wait with an error.

use std::time::Duration;

use super::clock::{Clock, TokioClock};
use super::error::ReconcileError;
use crate::marathon::{MarathonClient, Transport};
use crate::types::DeploymentId;

/// Fixed cadence between `/v2/deployments` polls.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct DeploymentWaiter<C = TokioClock> {
    clock: C,
    poll_interval: Duration,
}

impl<C: Clock> DeploymentWaiter<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            poll_interval: POLL_INTERVAL,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Wait until `deployment_id` is no longer listed as active.
    ///
    /// Every round fetches the list before looking at the deadline, so at
    /// least one fetch happens even with an already-expired deadline and the
    /// last fetch happens after the sleep that crosses it. Dropping the future
    /// stops polling immediately. A timeout too large to add to the clock's
    /// instant means there is no deadline.
    ///
    /// # Errors
    ///
    /// Returns `ReconcileError::DeploymentTimeout` once the deadline has passed
    /// and the deployment was still active (or unobservable) on the last fetch.
    pub async fn wait<T: Transport>(
        &self,
        client: &MarathonClient<T>,
        deployment_id: &DeploymentId,
        timeout: Duration,
    ) -> Result<(), ReconcileError> {
        let start = self.clock.now();
        let deadline = start.checked_add(timeout);
        let mut polls: u32 = 0;

        loop {
            polls = polls.saturating_add(1);
            match client.list_deployments().await {
                Ok(active) => {
                    if !active.iter().any(|d| &d.id == deployment_id) {
                        tracing::debug!(deployment = %deployment_id, polls, "deployment finished");
                        return Ok(());
                    }
                    tracing::debug!(deployment = %deployment_id, polls, "deployment still active");
                }
                Err(e) => {
                    tracing::warn!(
                        deployment = %deployment_id,
                        error = %e,
                        "polling deployments failed, retrying"
                    );
                }
            }

            let now = self.clock.now();
            if deadline.is_some_and(|deadline| now >= deadline) {
                return Err(ReconcileError::DeploymentTimeout {
                    deployment_id: deployment_id.clone(),
                    elapsed: now.saturating_duration_since(start),
                });
            }

            self.clock.sleep(self.poll_interval).await;
        }
    }
}
