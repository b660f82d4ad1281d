// ABOUTME: Drives one app toward a requested state through the Marathon client.
// ABOUTME: Looks up, selects an action, issues the calls and optionally waits.

use serde_json::{Map, Value};
use std::time::Duration;

use super::action::Action;
use super::clock::{Clock, TokioClock};
use super::error::{ReconcileError, ValidationError};
use super::payload::build_payload;
use super::state::TargetState;
use super::waiter::DeploymentWaiter;
use crate::config::AppSpec;
use crate::diagnostics::{Diagnostics, Warning};
use crate::marathon::{MarathonClient, OperationResult, Transport};
use crate::types::{AppId, DeploymentId};

/// Everything one reconciliation needs.
#[derive(Debug, Clone)]
pub struct ReconcileRequest {
    pub state: TargetState,
    pub spec: AppSpec,
}

impl ReconcileRequest {
    pub fn new(state: TargetState, spec: AppSpec) -> Self {
        Self { state, spec }
    }

    /// The app id, or the parameters the requested state is missing.
    pub fn validate(&self) -> Result<&AppId, ValidationError> {
        self.spec
            .id
            .as_ref()
            .ok_or_else(|| ValidationError::MissingParameters {
                state: self.state,
                params: self.state.required_parameters().to_vec(),
            })
    }
}

/// Result of a finished reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub app_id: AppId,
    pub state: TargetState,
    pub action: Action,
    /// Whether Marathon was asked to change anything.
    pub changed: bool,
    /// Raw JSON returned by the last mutating call.
    pub meta: Value,
}

/// Reconciles apps against one Marathon endpoint.
///
/// Runs strictly sequentially. Two reconciliations of the same app id must
/// not run concurrently; the caller is responsible for serializing them.
pub struct Reconciler<T, C = TokioClock> {
    client: MarathonClient<T>,
    waiter: DeploymentWaiter<C>,
}

impl<T: Transport> Reconciler<T, TokioClock> {
    pub fn new(client: MarathonClient<T>) -> Self {
        Self::with_clock(client, TokioClock)
    }
}

impl<T: Transport, C: Clock> Reconciler<T, C> {
    pub fn with_clock(client: MarathonClient<T>, clock: C) -> Self {
        Self {
            client,
            waiter: DeploymentWaiter::new(clock),
        }
    }

    pub fn client(&self) -> &MarathonClient<T> {
        &self.client
    }

    /// Bring the app named in `request.spec` to `request.state`.
    ///
    /// Validation happens before any request. Lookup, create, update, delete,
    /// restart and kill failures are fatal and never retried.
    pub async fn reconcile(
        &self,
        request: &ReconcileRequest,
        diagnostics: &mut Diagnostics,
    ) -> Result<Outcome, ReconcileError> {
        let app_id = request.validate()?.clone();
        let spec = &request.spec;
        let wait = spec.wait_timeout();

        let remote = if Action::needs_lookup(request.state) {
            self.client
                .get_app(&app_id)
                .await
                .map_err(|e| ReconcileError::from_api("lookup", e))?
        } else {
            None
        };

        let action = Action::select(request.state, remote.as_ref());
        tracing::info!(app = %app_id, state = %request.state, %action, "reconciling");

        let (changed, meta) = match action {
            Action::Create => {
                let result = self.create(spec, diagnostics, wait).await?;
                (true, result.into_raw())
            }
            Action::Update => {
                let payload = build_payload(spec, diagnostics);
                let result = self
                    .client
                    .update_app(&app_id, &payload, spec.force)
                    .await
                    .map_err(|e| ReconcileError::from_api("update", e))?;
                self.wait_for(result.first_deployment(), wait).await?;
                (true, result.into_raw())
            }
            Action::Replace => {
                let stuck: Vec<String> = remote
                    .iter()
                    .flat_map(|app| app.deployments.iter().map(|d| d.id.to_string()))
                    .collect();
                diagnostics.warn(Warning::stuck_deployment(format!(
                    "{app_id} had deployments in progress ({}); destroying and recreating it",
                    stuck.join(", ")
                )));
                if let Some(deleted) = self.destroy(&app_id).await? {
                    self.wait_for(deleted.first_deployment(), wait).await?;
                }
                let result = self.create(spec, diagnostics, wait).await?;
                (true, result.into_raw())
            }
            Action::Destroy => match self.destroy(&app_id).await? {
                Some(result) => {
                    self.wait_for(result.first_deployment(), wait).await?;
                    (true, result.into_raw())
                }
                None => {
                    diagnostics.warn(Warning::already_absent(format!(
                        "{app_id} does not exist; nothing to destroy"
                    )));
                    (false, Value::Object(Map::new()))
                }
            },
            Action::Restart => {
                let result = self
                    .client
                    .restart_app(&app_id, spec.force)
                    .await
                    .map_err(|e| ReconcileError::from_api("restart", e))?;
                self.wait_for(result.first_deployment(), wait).await?;
                (true, result.into_raw())
            }
            Action::Kill => {
                let result = self
                    .client
                    .kill_tasks(&app_id)
                    .await
                    .map_err(|e| ReconcileError::from_api("kill", e))?;
                tracing::debug!(app = %app_id, tasks = result.tasks().len(), "tasks killed");
                self.wait_for(result.first_deployment(), wait).await?;
                (true, result.into_raw())
            }
        };

        Ok(Outcome {
            app_id,
            state: request.state,
            action,
            changed,
            meta,
        })
    }

    /// Redeploy a stored version of the app.
    pub async fn rollback(
        &self,
        app_id: &AppId,
        version: &str,
        force: bool,
        wait: Option<Duration>,
    ) -> Result<OperationResult, ReconcileError> {
        tracing::info!(app = %app_id, version, "rolling back");
        let result = self
            .client
            .rollback_app(app_id, version, force)
            .await
            .map_err(|e| ReconcileError::from_api("rollback", e))?;
        self.wait_for(result.first_deployment(), wait).await?;
        Ok(result)
    }

    async fn create(
        &self,
        spec: &AppSpec,
        diagnostics: &mut Diagnostics,
        wait: Option<Duration>,
    ) -> Result<OperationResult, ReconcileError> {
        let payload = build_payload(spec, diagnostics);
        let result = self
            .client
            .create_app(&payload)
            .await
            .map_err(|e| ReconcileError::from_api("create", e))?;
        self.wait_for(result.first_deployment(), wait).await?;
        Ok(result)
    }

    async fn destroy(&self, app_id: &AppId) -> Result<Option<OperationResult>, ReconcileError> {
        self.client
            .delete_app(app_id)
            .await
            .map_err(|e| ReconcileError::from_api("destroy", e))
    }

    async fn wait_for(
        &self,
        deployment: Option<DeploymentId>,
        timeout: Option<Duration>,
    ) -> Result<(), ReconcileError> {
        match (deployment, timeout) {
            (Some(id), Some(timeout)) => {
                tracing::debug!(deployment = %id, ?timeout, "waiting for deployment");
                self.waiter.wait(&self.client, &id, timeout).await
            }
            _ => Ok(()),
        }
    }
}
