// ABOUTME: Status command implementation.
// ABOUTME: Shows the app's version, task counts and in-flight deployments.

use super::connection::{app_id, connect};
use serde_json::json;
use stride::config::Config;
use stride::error::Result;
use stride::output::{Output, OutputMode};

pub async fn status(config: Config, output: Output) -> Result<()> {
    let id = app_id(&config)?;
    let reconciler = connect(&config, &output)?;
    let remote = reconciler.client().get_app(&id).await?;

    if output.mode() == OutputMode::Json {
        let value = match &remote {
            Some(app) => json!({
                "id": id.as_str(),
                "deployed": true,
                "version": app.version,
                "instances": app.instances,
                "tasksRunning": app.tasks_running,
                "tasksHealthy": app.tasks_healthy,
                "deployments": app.deployments.iter().map(|d| d.id.as_str()).collect::<Vec<_>>(),
            }),
            None => json!({ "id": id.as_str(), "deployed": false }),
        };
        output.json(&value);
        return Ok(());
    }

    let Some(app) = remote else {
        output.success(&format!("{id}: not deployed"));
        return Ok(());
    };

    println!("App: {id}");
    if let Some(version) = &app.version {
        println!("Version: {version}");
    }
    println!(
        "Tasks: {} running, {} healthy, {} requested",
        count(app.tasks_running),
        count(app.tasks_healthy),
        count(app.instances)
    );
    if app.is_mid_deployment() {
        let ids: Vec<_> = app.deployments.iter().map(|d| d.id.as_str()).collect();
        println!("Deployments: {}", ids.join(", "));
    } else {
        println!("Deployments: none");
    }
    Ok(())
}

fn count(value: Option<u32>) -> String {
    value.map_or_else(|| "-".to_string(), |n| n.to_string())
}
