// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal, quiet (CI), and JSON output modes.

use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

use crate::reconcile::Outcome;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Minimal output for CI (only final result)
    Quiet,
    /// JSON lines for scripting
    Json,
}

impl OutputMode {
    pub fn from_flags(quiet: bool, json: bool) -> Self {
        if json {
            OutputMode::Json
        } else if quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Normal
        }
    }
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    fn duration_secs(&self) -> Option<f64> {
        self.start_time.map(|_| self.elapsed_secs())
    }

    /// Print a progress message (suppressed in quiet/json mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Print a success message with optional timing.
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => {
                let elapsed = self.elapsed_secs();
                if elapsed > 0.0 {
                    println!("{message} ({:.1}s)", elapsed);
                } else {
                    println!("{message}");
                }
            }
            OutputMode::Quiet => {
                // Print only the essential result
                println!("{message}");
            }
            OutputMode::Json => self.emit(&JsonEvent {
                event: "success",
                message,
                duration_secs: self.duration_secs(),
            }),
        }
    }

    /// Print a non-fatal warning. Shown in every mode.
    pub fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => eprintln!("Warning: {message}"),
            OutputMode::Json => self.emit_err(&JsonEvent {
                event: "warning",
                message,
                duration_secs: None,
            }),
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                eprintln!("Error: {message}");
            }
            OutputMode::Json => self.emit_err(&JsonEvent {
                event: "error",
                message,
                duration_secs: self.duration_secs(),
            }),
        }
    }

    /// Print the result of a reconciliation.
    pub fn outcome(&self, uri: &str, outcome: &Outcome) {
        match self.mode {
            OutputMode::Json => self.emit(&OutcomeEvent::new(uri, outcome)),
            OutputMode::Normal | OutputMode::Quiet => {
                let verb = if outcome.changed { "is now" } else { "already" };
                self.success(&format!(
                    "{} {verb} {} ({})",
                    outcome.app_id, outcome.state, outcome.action
                ));
            }
        }
    }

    /// Print an arbitrary JSON document (json mode) on stdout.
    pub fn json(&self, value: &impl Serialize) {
        self.emit(value);
    }

    fn emit(&self, value: &impl Serialize) {
        if let Ok(json) = serde_json::to_string(value) {
            println!("{json}");
        }
    }

    fn emit_err(&self, value: &impl Serialize) {
        if let Ok(json) = serde_json::to_string(value) {
            eprintln!("{json}");
        }
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}

/// Machine-readable reconciliation result.
#[derive(Debug, Serialize)]
pub struct OutcomeEvent<'a> {
    pub uri: &'a str,
    pub id: &'a str,
    pub state: &'a str,
    pub changed: bool,
    pub meta: &'a Value,
}

impl<'a> OutcomeEvent<'a> {
    pub fn new(uri: &'a str, outcome: &'a Outcome) -> Self {
        Self {
            uri,
            id: outcome.app_id.as_str(),
            state: outcome.state.as_str(),
            changed: outcome.changed,
            meta: &outcome.meta,
        }
    }
}
