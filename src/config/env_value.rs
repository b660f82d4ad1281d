// ABOUTME: Config values that are written inline or read from the environment.
// ABOUTME: Used for app env entries and the Marathon password; resolved once at load time.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// An inline value, or `{env: VAR, default: ...}`.
///
/// Marathon only accepts strings in `env`, so YAML numbers and booleans are
/// turned back into text. Floats go through `f64`, which drops trailing zeros
/// (`1.10` becomes `"1.1"`); quote the value to keep it exactly as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvValue {
    Literal(String),
    FromEnv { var: String, default: Option<String> },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEnvValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
    Reference {
        env: String,
        #[serde(default)]
        default: Option<String>,
    },
}

impl<'de> Deserialize<'de> for EnvValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(match RawEnvValue::deserialize(deserializer)? {
            RawEnvValue::Text(s) => EnvValue::Literal(s),
            RawEnvValue::Integer(n) => EnvValue::Literal(n.to_string()),
            RawEnvValue::Float(f) => EnvValue::Literal(f.to_string()),
            RawEnvValue::Flag(b) => EnvValue::Literal(b.to_string()),
            RawEnvValue::Reference { env, default } => EnvValue::FromEnv { var: env, default },
        })
    }
}

impl EnvValue {
    /// Resolve against the process environment.
    pub fn resolve(&self) -> Result<String> {
        self.resolve_with(|var| std::env::var(var).ok())
    }

    /// Resolve with a custom variable lookup. A set variable wins over the default.
    pub fn resolve_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
        match self {
            EnvValue::Literal(s) => Ok(s.clone()),
            EnvValue::FromEnv { var, default } => lookup(var)
                .or_else(|| default.clone())
                .ok_or_else(|| Error::MissingEnvVar(var.clone())),
        }
    }
}

pub fn resolve_env_map(map: &BTreeMap<String, EnvValue>) -> Result<BTreeMap<String, String>> {
    map.iter()
        .map(|(k, v)| v.resolve().map(|resolved| (k.clone(), resolved)))
        .collect()
}
