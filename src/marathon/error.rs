// ABOUTME: Error types for talking to the Marathon REST API.
// ABOUTME: Separates transport failures from HTTP error statuses.

use thiserror::Error;

/// The request never produced a usable HTTP response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to build HTTP client: {0}")]
    Build(String),

    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("invalid JSON in response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

/// A typed Marathon call failed.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected response body: {0}")]
    UnexpectedBody(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
