// ABOUTME: Library root for stride - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod marathon;
pub mod output;
pub mod reconcile;
pub mod types;
