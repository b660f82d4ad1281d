// ABOUTME: Command module aggregator for the stride CLI.
// ABOUTME: Re-exports apply, status, versions, and rollback command handlers.

mod apply;
mod connection;
mod rollback;
mod status;
mod versions;

pub use apply::{ApplyOverrides, apply};
pub use connection::load_config;
pub use rollback::rollback;
pub use status::status;
pub use versions::versions;
