// ABOUTME: Shared helpers for loading config and reaching Marathon.
// ABOUTME: Eliminates duplication across apply, status, versions, and rollback commands.

use std::env;
use std::path::Path;
use stride::config::Config;
use stride::error::{Error, Result};
use stride::marathon::{HttpTransport, MarathonClient};
use stride::output::Output;
use stride::reconcile::Reconciler;
use stride::types::AppId;

/// Load the config file (explicit path or discovered) and apply a destination.
pub fn load_config(path: Option<&Path>, destination: Option<&str>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load(path)?,
        None => Config::discover(&env::current_dir()?)?,
    };

    match destination {
        Some(dest) => config.for_destination(dest),
        None => Ok(config),
    }
}

/// Build a reconciler talking HTTP to the configured Marathon.
pub fn connect(config: &Config, output: &Output) -> Result<Reconciler<HttpTransport>> {
    output.progress(&format!("  → Connecting to {}...", config.marathon.uri));
    let transport = HttpTransport::from_config(&config.marathon)?;
    Ok(Reconciler::new(MarathonClient::new(transport)))
}

/// The configured app id; every command addresses exactly one app.
pub fn app_id(config: &Config) -> Result<AppId> {
    config
        .app
        .id
        .clone()
        .ok_or_else(|| Error::InvalidConfig("app.id is required".to_string()))
}
