// ABOUTME: Marathon health check definition.
// ABOUTME: Numeric fields accept numeric strings and are always sent as integers.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::deserialize::lenient_int;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Value>,

    #[serde(
        default,
        deserialize_with = "lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub port: Option<i64>,

    #[serde(
        default,
        alias = "port_index",
        deserialize_with = "lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub port_index: Option<i64>,

    #[serde(
        default,
        alias = "grace_period_seconds",
        deserialize_with = "lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub grace_period_seconds: Option<i64>,

    #[serde(
        default,
        alias = "interval_seconds",
        deserialize_with = "lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub interval_seconds: Option<i64>,

    #[serde(
        default,
        alias = "timeout_seconds",
        deserialize_with = "lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub timeout_seconds: Option<i64>,

    #[serde(
        default,
        alias = "max_consecutive_failures",
        deserialize_with = "lenient_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_consecutive_failures: Option<i64>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}
