// ABOUTME: Builds the create/update request body from a declared app spec.
// ABOUTME: Only set fields from a fixed allow-list are merged; container is synthesized if needed.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::config::{AppSpec, ContainerSpec, DOCKER_CONTAINER, DockerSpec, MESOS_CONTAINER};
use crate::diagnostics::{Diagnostics, Warning};

/// Wire names of the fields merged into the request body, besides `id`.
pub const MERGEABLE_FIELDS: [&str; 21] = [
    "cmd",
    "args",
    "cpus",
    "mem",
    "ports",
    "requirePorts",
    "instances",
    "user",
    "executor",
    "container",
    "env",
    "constraints",
    "acceptedResourceRoles",
    "labels",
    "uris",
    "dependencies",
    "healthChecks",
    "backoffFactor",
    "backoffSeconds",
    "maxLaunchDelaySeconds",
    "upgradeStrategy",
];

/// Build the JSON body for `POST /v2/apps` and `PUT /v2/apps/{id}`.
///
/// Unset fields are left out so an update never resets server-side values.
/// Same spec in, same map out; findings such as ignored fields go to
/// `diagnostics`.
pub fn build_payload(spec: &AppSpec, diagnostics: &mut Diagnostics) -> Map<String, Value> {
    let mut body = Body::default();

    if let Some(id) = &spec.id {
        body.insert("id", id.as_str());
    }

    body.text("cmd", spec.cmd.as_deref());
    body.list("args", &spec.args);
    body.option("cpus", spec.cpus);
    body.option("mem", spec.mem);
    body.list("ports", &spec.ports);
    body.option("requirePorts", spec.require_ports);
    body.option("instances", spec.instances);
    body.text("user", spec.user.as_deref());
    body.text("executor", spec.executor.as_deref());
    body.option("container", container_for(spec, diagnostics));
    body.map("env", &spec.env);
    body.list("constraints", &spec.constraints);
    body.list("acceptedResourceRoles", &spec.accepted_resource_roles);
    body.map("labels", &spec.labels);
    body.list("uris", &spec.uris);
    body.list("dependencies", &spec.dependencies);
    body.list("healthChecks", &spec.health_checks);
    body.option("backoffFactor", spec.backoff_factor);
    body.option("backoffSeconds", spec.backoff_seconds);
    body.option("maxLaunchDelaySeconds", spec.max_launch_delay_seconds);
    body.map("upgradeStrategy", &upgrade_strategy(spec));

    warn_unmerged(spec, diagnostics);

    body.0
}

#[derive(Default)]
struct Body(Map<String, Value>);

impl Body {
    fn insert(&mut self, key: &str, value: impl Serialize) {
        match serde_json::to_value(value) {
            Ok(value) => {
                self.0.insert(key.to_string(), value);
            }
            Err(e) => tracing::warn!(field = key, error = %e, "field could not be encoded"),
        }
    }

    fn option<T: Serialize>(&mut self, key: &str, value: Option<T>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    fn text(&mut self, key: &str, value: Option<&str>) {
        self.option(key, value.filter(|s| !s.is_empty()));
    }

    fn list<T: Serialize>(&mut self, key: &str, values: &[T]) {
        if !values.is_empty() {
            self.insert(key, values);
        }
    }

    fn map<T: Serialize>(&mut self, key: &str, values: &BTreeMap<String, T>) {
        if !values.is_empty() {
            self.insert(key, values);
        }
    }
}

/// The container to send: the explicit one, or one built from the flattened
/// `docker_*` / `container_*` options.
fn container_for(spec: &AppSpec, diagnostics: &mut Diagnostics) -> Option<ContainerSpec> {
    if let Some(container) = &spec.container {
        for field in flattened_container_options(spec) {
            diagnostics.warn(Warning::shadowed_container_option(field));
        }
        return Some(container.clone());
    }

    if let Some(image) = spec.docker_image.as_deref().filter(|i| !i.is_empty()) {
        if spec
            .container_type
            .as_deref()
            .is_some_and(|t| !t.eq_ignore_ascii_case(DOCKER_CONTAINER))
        {
            diagnostics.warn(Warning::ignored_field("container_type"));
        }
        return Some(ContainerSpec {
            kind: Some(DOCKER_CONTAINER.to_string()),
            docker: Some(DockerSpec {
                image: image.to_string(),
                network: spec.docker_network.clone().filter(|n| !n.is_empty()),
                privileged: Some(spec.docker_privileged.unwrap_or(false)),
                force_pull_image: Some(spec.docker_force_pull_image.unwrap_or(false)),
                parameters: spec.docker_parameters.clone(),
                port_mappings: spec.docker_port_mappings.clone(),
                extra: BTreeMap::new(),
            }),
            volumes: spec.container_volumes.clone(),
            extra: BTreeMap::new(),
        });
    }

    if !spec.container_volumes.is_empty() {
        return Some(ContainerSpec {
            kind: Some(
                spec.container_type
                    .clone()
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| MESOS_CONTAINER.to_string()),
            ),
            docker: None,
            volumes: spec.container_volumes.clone(),
            extra: BTreeMap::new(),
        });
    }

    None
}

fn flattened_container_options(spec: &AppSpec) -> Vec<&'static str> {
    let mut fields = Vec::new();
    if spec.docker_image.is_some() {
        fields.push("docker_image");
    }
    if spec.docker_network.is_some() {
        fields.push("docker_network");
    }
    if spec.docker_privileged.is_some() {
        fields.push("docker_privileged");
    }
    if spec.docker_force_pull_image.is_some() {
        fields.push("docker_force_pull_image");
    }
    if !spec.docker_parameters.is_empty() {
        fields.push("docker_parameters");
    }
    if !spec.docker_port_mappings.is_empty() {
        fields.push("docker_port_mappings");
    }
    if spec.container_type.is_some() {
        fields.push("container_type");
    }
    if !spec.container_volumes.is_empty() {
        fields.push("container_volumes");
    }
    fields
}

/// Explicit `upgrade_strategy` plus the flattened capacities when non-zero.
fn upgrade_strategy(spec: &AppSpec) -> BTreeMap<String, Value> {
    let mut strategy = spec.upgrade_strategy.clone();
    let flattened = [
        (
            "minimumHealthCapacity",
            spec.upgrade_strategy_minimum_health_capacity,
        ),
        (
            "maximumOverCapacity",
            spec.upgrade_strategy_maximum_over_capacity,
        ),
    ];
    for (key, value) in flattened {
        if let Some(value) = value.filter(|v| *v != 0.0) {
            strategy.insert(key.to_string(), Value::from(value));
        }
    }
    strategy
}

fn warn_unmerged(spec: &AppSpec, diagnostics: &mut Diagnostics) {
    if spec.disk.is_some() {
        diagnostics.warn(Warning::ignored_field("disk"));
    }
    if !spec.store_urls.is_empty() {
        diagnostics.warn(Warning::ignored_field("store_urls"));
    }
    if !spec.fetch.is_empty() {
        diagnostics.warn(Warning::ignored_field("fetch"));
    }
    if spec.version.is_some() {
        diagnostics.warn(Warning::ignored_field("version"));
    }
}
