// ABOUTME: Marathon REST API access: transport capability, HTTP implementation, typed client.
// ABOUTME: Everything the reconciler knows about the wire lives here.

mod client;
mod error;
mod http;
mod transport;
mod wire;

pub use client::{MarathonClient, app_path};
pub use error::{ApiError, TransportError};
pub use http::{Credentials, HttpTransport};
pub use transport::{Method, Response, Transport};
pub use wire::{DeploymentRef, OperationResult, RemoteApp};
