// ABOUTME: Custom serde deserializers for config types.
// ABOUTME: Integer coercion, env interpolation, app ids and non-negative numbers.

use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

use super::env_value::{EnvValue, resolve_env_map};
use crate::types::AppId;

/// A number as it may appear in hand-written YAML: `8080`, `8080.0` or `"8080"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IntLike {
    Int(i64),
    Float(f64),
    Text(String),
}

impl IntLike {
    fn into_int(self) -> Result<i64, String> {
        match self {
            IntLike::Int(n) => Ok(n),
            IntLike::Float(f) => float_to_int(f),
            IntLike::Text(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .or_else(|_| {
                        s.parse::<f64>()
                            .map_err(|_| format!("expected an integer, found \"{s}\""))
                            .and_then(float_to_int)
                    })
            }
        }
    }
}

fn float_to_int(f: f64) -> Result<i64, String> {
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Ok(f as i64)
    } else {
        Err(format!("expected an integer, found {f}"))
    }
}

/// Optional integer that also accepts numeric strings and integral floats.
pub fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<IntLike>::deserialize(deserializer)?
        .map(IntLike::into_int)
        .transpose()
        .map_err(serde::de::Error::custom)
}

/// List of integers, each element coerced like `lenient_int`.
pub fn lenient_int_list<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<IntLike>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .map(IntLike::into_int)
        .collect::<Result<Vec<_>, _>>()
        .map_err(serde::de::Error::custom)
}

pub fn non_negative<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        Some(v) if v < 0.0 || v.is_nan() => Err(serde::de::Error::custom(format!(
            "expected a non-negative number, found {v}"
        ))),
        other => Ok(other),
    }
}

/// An empty or missing id is treated as unset so the reconciler can report it.
pub fn optional_app_id<'de, D>(deserializer: D) -> Result<Option<AppId>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => AppId::new(&s).map(Some).map_err(serde::de::Error::custom),
    }
}

pub fn resolved_env<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, EnvValue>>::deserialize(deserializer)?.unwrap_or_default();
    resolve_env_map(&raw).map_err(serde::de::Error::custom)
}

pub fn resolved_secret<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<EnvValue>::deserialize(deserializer)?
        .map(|v| v.resolve())
        .transpose()
        .map_err(serde::de::Error::custom)
}
