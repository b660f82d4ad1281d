// ABOUTME: Versions command implementation.
// ABOUTME: Lists stored app versions, newest first.

use super::connection::{app_id, connect};
use chrono::SecondsFormat;
use serde_json::json;
use stride::config::Config;
use stride::error::Result;
use stride::output::{Output, OutputMode};

pub async fn versions(config: Config, output: Output) -> Result<()> {
    let id = app_id(&config)?;
    let reconciler = connect(&config, &output)?;
    let versions: Vec<String> = reconciler
        .client()
        .app_versions(&id)
        .await?
        .iter()
        .map(|v| v.to_rfc3339_opts(SecondsFormat::Millis, true))
        .collect();

    match output.mode() {
        OutputMode::Json => output.json(&json!({ "id": id.as_str(), "versions": versions })),
        OutputMode::Normal | OutputMode::Quiet => {
            if versions.is_empty() {
                output.success(&format!("{id}: no stored versions"));
            }
            for version in &versions {
                println!("{version}");
            }
        }
    }
    Ok(())
}
