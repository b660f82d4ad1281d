// ABOUTME: Declared application definition, the desired state of one Marathon app.
// ABOUTME: Accepts both snake_case and camelCase spellings; aliases resolve here only.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

use super::container::{ContainerSpec, DockerParameter, PortMapping, Volume};
use super::deserialize::{lenient_int_list, non_negative, optional_app_id, resolved_env};
use super::healthcheck::HealthCheck;
use crate::types::AppId;

/// Desired configuration of a Marathon app.
///
/// Every field is optional. A field left out of the file stays unset and is
/// never sent to Marathon, so server-side values survive an update.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppSpec {
    #[serde(default, deserialize_with = "optional_app_id")]
    pub id: Option<AppId>,

    #[serde(default, alias = "command")]
    pub cmd: Option<String>,

    #[serde(default, alias = "arguments")]
    pub args: Vec<String>,

    #[serde(default, deserialize_with = "non_negative")]
    pub cpus: Option<f64>,

    #[serde(default, alias = "memory", deserialize_with = "non_negative")]
    pub mem: Option<f64>,

    #[serde(default, deserialize_with = "non_negative")]
    pub disk: Option<f64>,

    #[serde(default)]
    pub instances: Option<u32>,

    #[serde(default, deserialize_with = "lenient_int_list")]
    pub ports: Vec<i64>,

    #[serde(default, alias = "requirePorts")]
    pub require_ports: Option<bool>,

    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub executor: Option<String>,

    #[serde(default)]
    pub container: Option<ContainerSpec>,

    #[serde(default)]
    pub docker_image: Option<String>,

    #[serde(default, alias = "docker_forcePullImage")]
    pub docker_force_pull_image: Option<bool>,

    #[serde(default)]
    pub docker_privileged: Option<bool>,

    #[serde(default)]
    pub docker_network: Option<String>,

    #[serde(default)]
    pub docker_parameters: Vec<DockerParameter>,

    #[serde(default, alias = "docker_portMappings")]
    pub docker_port_mappings: Vec<PortMapping>,

    #[serde(default)]
    pub container_type: Option<String>,

    #[serde(default)]
    pub container_volumes: Vec<Volume>,

    #[serde(default, deserialize_with = "resolved_env")]
    pub env: BTreeMap<String, String>,

    #[serde(default)]
    pub constraints: Vec<Vec<Value>>,

    #[serde(default, alias = "acceptedResourceRoles")]
    pub accepted_resource_roles: Vec<String>,

    #[serde(default)]
    pub labels: BTreeMap<String, String>,

    #[serde(default)]
    pub uris: Vec<String>,

    #[serde(default, alias = "storeUrls")]
    pub store_urls: Vec<String>,

    #[serde(default)]
    pub fetch: Vec<Value>,

    #[serde(default)]
    pub dependencies: Vec<String>,

    #[serde(default, alias = "healthChecks")]
    pub health_checks: Vec<HealthCheck>,

    #[serde(default, alias = "backoffSeconds")]
    pub backoff_seconds: Option<f64>,

    #[serde(default, alias = "backoffFactor")]
    pub backoff_factor: Option<f64>,

    #[serde(default, alias = "maxLaunchDelaySeconds")]
    pub max_launch_delay_seconds: Option<f64>,

    #[serde(default, alias = "upgradeStrategy")]
    pub upgrade_strategy: BTreeMap<String, Value>,

    #[serde(default, alias = "upgradeStrategy_minimumHealthCapacity")]
    pub upgrade_strategy_minimum_health_capacity: Option<f64>,

    #[serde(default, alias = "upgradeStrategy_maximumOverCapacity")]
    pub upgrade_strategy_maximum_over_capacity: Option<f64>,

    #[serde(default)]
    pub version: Option<String>,

    /// Override a running deployment that blocks the update or restart.
    #[serde(default)]
    pub force: bool,

    /// Seconds to wait for the triggered deployment to finish. Zero disables waiting.
    #[serde(default, alias = "waitTimeout")]
    pub wait_timeout: Option<u64>,
}

impl AppSpec {
    /// Create a spec that only names the app.
    pub fn with_id(id: AppId) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    /// The wait timeout, if waiting was requested.
    pub fn wait_timeout(&self) -> Option<Duration> {
        self.wait_timeout
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}
