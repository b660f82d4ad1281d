// ABOUTME: Rollback command implementation.
// ABOUTME: Redeploys a stored app version, by default the one before the current.

use super::connection::{app_id, connect};
use chrono::SecondsFormat;
use stride::config::Config;
use stride::error::{Error, Result};
use stride::output::Output;

pub async fn rollback(
    config: Config,
    version: Option<String>,
    wait_timeout: Option<u64>,
    force: bool,
    mut output: Output,
) -> Result<()> {
    let id = app_id(&config)?;
    output.start_timer();
    let reconciler = connect(&config, &output)?;

    let version = match version {
        Some(version) => version,
        None => {
            output.progress("  → Looking up previous version...");
            let versions = reconciler.client().app_versions(&id).await?;
            versions
                .get(1)
                .map(|v| v.to_rfc3339_opts(SecondsFormat::Millis, true))
                .ok_or_else(|| Error::NoPreviousVersion(id.to_string()))?
        }
    };

    let mut spec = config.app.clone();
    if wait_timeout.is_some() {
        spec.wait_timeout = wait_timeout;
    }

    output.progress(&format!("Rolling back {id} to {version}"));
    reconciler
        .rollback(&id, &version, force || spec.force, spec.wait_timeout())
        .await?;

    output.success("Rollback complete!");
    Ok(())
}
