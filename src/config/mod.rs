// ABOUTME: Configuration types and parsing for stride.yml.
// ABOUTME: Handles YAML parsing, env var interpolation, and destination merging.

mod app;
mod container;
mod deserialize;
mod env_value;
mod healthcheck;
mod init;
mod marathon;

pub use app::AppSpec;
pub use container::{
    ContainerSpec, DOCKER_CONTAINER, DockerParameter, DockerSpec, MESOS_CONTAINER, PortMapping,
    Volume,
};
pub use env_value::{EnvValue, resolve_env_map};
pub use healthcheck::HealthCheck;
pub use init::init_config;
pub use marathon::MarathonConfig;

use crate::error::{Error, Result};
use crate::reconcile::TargetState;
use crate::types::AppId;
use deserialize::resolved_env;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

pub const CONFIG_FILENAME: &str = "stride.yml";
pub const CONFIG_FILENAME_ALT: &str = "stride.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".stride/config.yml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub marathon: MarathonConfig,

    #[serde(default)]
    pub state: TargetState,

    #[serde(default)]
    pub app: AppSpec,

    #[serde(default)]
    pub destinations: HashMap<String, Destination>,
}

/// Named overrides, e.g. a staging cluster with fewer instances.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Destination {
    #[serde(default)]
    pub marathon: Option<MarathonConfig>,

    #[serde(default, deserialize_with = "resolved_env")]
    pub env: BTreeMap<String, String>,

    #[serde(default)]
    pub labels: BTreeMap<String, String>,

    #[serde(default)]
    pub instances: Option<u32>,

    #[serde(default)]
    pub cpus: Option<f64>,

    #[serde(default, alias = "memory")]
    pub mem: Option<f64>,

    #[serde(default, alias = "waitTimeout")]
    pub wait_timeout: Option<u64>,

    #[serde(default)]
    pub force: Option<bool>,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    fn validate(&self) -> Result<()> {
        self.marathon.validate().map_err(Error::InvalidConfig)?;
        for (name, dest) in &self.destinations {
            if let Some(marathon) = &dest.marathon {
                marathon
                    .validate()
                    .map_err(|e| Error::InvalidConfig(format!("destination {name}: {e}")))?;
            }
        }
        Ok(())
    }

    pub fn for_destination(&self, name: &str) -> Result<Config> {
        let dest = self
            .destinations
            .get(name)
            .ok_or_else(|| Error::UnknownDestination(name.to_string()))?;

        let mut merged = self.clone();

        if let Some(ref marathon) = dest.marathon {
            merged.marathon = marathon.clone();
        }

        // Deep merge env and labels
        for (k, v) in &dest.env {
            merged.app.env.insert(k.clone(), v.clone());
        }
        for (k, v) in &dest.labels {
            merged.app.labels.insert(k.clone(), v.clone());
        }

        if dest.instances.is_some() {
            merged.app.instances = dest.instances;
        }
        if dest.cpus.is_some() {
            merged.app.cpus = dest.cpus;
        }
        if dest.mem.is_some() {
            merged.app.mem = dest.mem;
        }
        if dest.wait_timeout.is_some() {
            merged.app.wait_timeout = dest.wait_timeout;
        }
        if let Some(force) = dest.force {
            merged.app.force = force;
        }

        Ok(merged)
    }

    pub fn template() -> Self {
        Config {
            marathon: MarathonConfig::new("http://marathon.example.com:8080"),
            state: TargetState::Present,
            app: AppSpec {
                cpus: Some(0.5),
                mem: Some(256.0),
                instances: Some(1),
                docker_image: Some("nginx:alpine".to_string()),
                docker_network: Some("BRIDGE".to_string()),
                wait_timeout: Some(300),
                ..AppSpec::with_id(AppId::new("/my-app").expect("template app id is valid"))
            },
            destinations: HashMap::new(),
        }
    }
}
