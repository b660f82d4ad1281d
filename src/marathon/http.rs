// ABOUTME: reqwest-backed Transport for a real Marathon endpoint.
// ABOUTME: Adds basic auth and JSON headers, enforces connect and request timeouts.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use std::time::Duration;

use super::error::TransportError;
use super::transport::{Method, Response, Transport};
use crate::config::MarathonConfig;

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    credentials: Option<Credentials>,
}

impl HttpTransport {
    /// Create a transport rooted at `<uri>/v2`.
    pub fn new(
        uri: &str,
        credentials: Option<Credentials>,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;

        Ok(Self {
            client,
            base_url: format!("{}/v2", uri.trim().trim_end_matches('/')),
            credentials,
        })
    }

    pub fn from_config(config: &MarathonConfig) -> Result<Self, TransportError> {
        let credentials = config.username.as_ref().map(|username| Credentials {
            username: username.clone(),
            password: config.password.clone(),
        });
        Self::new(
            &config.uri,
            credentials,
            config.connect_timeout,
            config.request_timeout,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Response, TransportError> {
        let url = self.url(path);
        tracing::debug!(%method, %url, "marathon request");

        let mut request = self.client.request(method.into(), &url);
        if let Some(creds) = &self.credentials {
            request = request.basic_auth(&creds.username, creds.password.as_deref());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| TransportError::Request {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| TransportError::Request {
            url: url.clone(),
            reason: format!("failed to read response body: {e}"),
        })?;

        let status_code = status.as_u16();
        tracing::debug!(%method, %url, status = status_code, "marathon response");

        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("error");
            return Ok(Response::error(status_code, error_message(&text, reason)));
        }

        if text.trim().is_empty() {
            return Ok(Response::empty(status_code));
        }

        let body = serde_json::from_str(&text).map_err(|e| TransportError::Decode {
            url,
            reason: e.to_string(),
        })?;
        Ok(Response::ok(status_code, body))
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Marathon errors are usually `{"message": "..."}`; fall back to the raw text.
fn error_message(text: &str, reason: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return reason.to_string();
    }
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => match map.get("message").and_then(Value::as_str) {
            Some(message) => message.to_string(),
            None => text.to_string(),
        },
        _ => text.to_string(),
    }
}
