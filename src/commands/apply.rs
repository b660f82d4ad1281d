// ABOUTME: Apply command implementation.
// ABOUTME: Reconciles the configured app to the requested state and reports the outcome.

use super::connection::connect;
use std::str::FromStr;
use stride::config::Config;
use stride::diagnostics::Diagnostics;
use stride::error::Result;
use stride::output::Output;
use stride::reconcile::{ReconcileRequest, TargetState};

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default)]
pub struct ApplyOverrides {
    pub state: Option<String>,
    pub wait_timeout: Option<u64>,
    pub force: bool,
}

pub async fn apply(config: Config, overrides: ApplyOverrides, mut output: Output) -> Result<()> {
    let state = match overrides.state.as_deref() {
        Some(state) => TargetState::from_str(state)?,
        None => config.state,
    };

    let mut spec = config.app.clone();
    if overrides.wait_timeout.is_some() {
        spec.wait_timeout = overrides.wait_timeout;
    }
    spec.force |= overrides.force;

    let request = ReconcileRequest::new(state, spec);
    // Fail before connecting when the request cannot be reconciled.
    let app_id = request.validate()?.clone();

    output.start_timer();
    let mut diag = Diagnostics::default();

    output.progress(&format!("Reconciling {app_id} to {state}"));
    let reconciler = connect(&config, &output)?;
    let outcome = reconciler.reconcile(&request, &mut diag).await?;

    // Emit collected warnings
    for warning in diag.warnings() {
        output.warning(&warning.message);
    }

    output.outcome(&config.marathon.uri, &outcome);
    Ok(())
}
