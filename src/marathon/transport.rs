// ABOUTME: Transport capability the Marathon client is built on.
// ABOUTME: One async method that sends a JSON request and returns status plus body.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt;

use super::error::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP response reduced to what the reconciler needs.
///
/// Successful responses carry the parsed JSON body (an empty object when the
/// server sent nothing). Error responses carry the server's message instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Value,
    pub message: String,
}

impl Response {
    pub fn ok(status: u16, body: Value) -> Self {
        Self {
            status,
            body,
            message: String::new(),
        }
    }

    pub fn empty(status: u16) -> Self {
        Self::ok(status, Value::Object(Map::new()))
    }

    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: Value::Object(Map::new()),
            message: message.into(),
        }
    }

    /// 200 and 204 for most calls, 201 when an app is created.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests to the `/v2` API root.
///
/// `path` is relative to the API root and may carry a query string,
/// e.g. `/apps/web?force=true`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Response, TransportError>;
}
