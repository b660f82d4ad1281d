// ABOUTME: Connection settings for the Marathon REST API.
// ABOUTME: Base URI, optional basic auth credentials and HTTP timeouts.

use serde::Deserialize;
use std::time::Duration;

use super::deserialize::resolved_secret;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarathonConfig {
    pub uri: String,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default, deserialize_with = "resolved_secret")]
    pub password: Option<String>,

    #[serde(default = "default_connect_timeout", with = "humantime_serde")]
    pub connect_timeout: Duration,

    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(5)
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

impl MarathonConfig {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            username: None,
            password: None,
            connect_timeout: default_connect_timeout(),
            request_timeout: default_request_timeout(),
        }
    }

    /// Check the URI looks like an HTTP endpoint.
    pub fn validate(&self) -> Result<(), String> {
        let uri = self.uri.trim();
        if uri.is_empty() {
            return Err("marathon.uri cannot be empty".to_string());
        }
        if !uri.starts_with("http://") && !uri.starts_with("https://") {
            return Err(format!(
                "marathon.uri must start with http:// or https://, found {uri}"
            ));
        }
        if self.password.is_some() && self.username.is_none() {
            return Err("marathon.password requires marathon.username".to_string());
        }
        Ok(())
    }
}
