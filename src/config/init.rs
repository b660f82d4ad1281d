// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates stride.yml template files.

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::AppId;

use super::{CONFIG_FILENAME, Config, MarathonConfig};

pub fn init_config(
    dir: &Path,
    app_id: Option<&str>,
    uri: Option<&str>,
    force: bool,
) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let mut config = Config::template();

    if let Some(id) = app_id {
        config.app.id = Some(AppId::new(id).map_err(|e| Error::InvalidConfig(e.to_string()))?);
    }

    if let Some(uri) = uri {
        let marathon = MarathonConfig::new(uri);
        marathon.validate().map_err(Error::InvalidConfig)?;
        config.marathon = marathon;
    }

    let yaml = generate_template_yaml(&config);
    std::fs::write(&config_path, yaml)?;

    Ok(())
}

fn generate_template_yaml(config: &Config) -> String {
    let app = &config.app;
    format!(
        r#"marathon:
  uri: {uri}
  # username: admin
  # password:
  #   env: MARATHON_PASSWORD
  # connect_timeout: 5s
  # request_timeout: 30s

# One of: present, absent, restart, kill
state: {state}

app:
  id: {id}
  instances: {instances}
  cpus: {cpus}
  mem: {mem}
  docker_image: {image}
  docker_network: {network}
  # docker_port_mappings:
  #   - containerPort: 80
  #     hostPort: 0
  # env:
  #   LOG_LEVEL: info
  #   # Quote version-like numbers, or 1.10 is sent as "1.1"
  #   APP_VERSION: "1.10"
  # Seconds to wait for the deployment to finish (0 = don't wait)
  wait_timeout: {wait}
"#,
        uri = config.marathon.uri,
        state = config.state,
        id = app.id.as_ref().map(AppId::as_str).unwrap_or("/my-app"),
        instances = app.instances.unwrap_or(1),
        cpus = app.cpus.unwrap_or(0.5),
        mem = app.mem.unwrap_or(256.0),
        image = app.docker_image.as_deref().unwrap_or("nginx:alpine"),
        network = app.docker_network.as_deref().unwrap_or("BRIDGE"),
        wait = app.wait_timeout.unwrap_or(0),
    )
}
