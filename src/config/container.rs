// ABOUTME: Container definition types sent to Marathon.
// ABOUTME: Docker settings, port mappings and volumes, with integer coercion on input.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::deserialize::lenient_int;

/// Native Mesos containerizer, used when no image is given.
pub const MESOS_CONTAINER: &str = "MESOS";
/// Docker containerizer, used when an image is given.
pub const DOCKER_CONTAINER: &str = "DOCKER";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerSpec {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker: Option<DockerSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<Volume>,

    /// Fields Marathon understands but this tool passes through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockerSpec {
    pub image: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privileged: Option<bool>,

    #[serde(
        default,
        alias = "force_pull_image",
        skip_serializing_if = "Option::is_none"
    )]
    pub force_pull_image: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<DockerParameter>,

    #[serde(default, alias = "port_mappings", skip_serializing_if = "Vec::is_empty")]
    pub port_mappings: Vec<PortMapping>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerParameter {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortMapping {
    #[serde(
        default,
        alias = "container_port",
        deserialize_with = "lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub container_port: Option<i64>,

    #[serde(
        default,
        alias = "host_port",
        deserialize_with = "lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub host_port: Option<i64>,

    #[serde(
        default,
        alias = "service_port",
        deserialize_with = "lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub service_port: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    #[serde(alias = "container_path")]
    pub container_path: String,

    #[serde(default, alias = "host_path", skip_serializing_if = "Option::is_none")]
    pub host_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}
