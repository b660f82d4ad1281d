// ABOUTME: Type-safe identifiers and validated domain types.
// ABOUTME: Uses phantom types to prevent ID confusion at compile time.

mod app_id;
mod id;

pub use app_id::{AppId, AppIdError};
pub use id::{DeploymentId, IdKind, TaskId};
