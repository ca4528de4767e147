//! Diagnostics sinks passed explicitly into path resolution and the runner.
//!
//! `TracingSink` forwards to the global `tracing` subscriber; `MemorySink`
//! collects diagnostics in memory so tests can assert on them.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

/// One diagnostic message, optionally tied to a filesystem location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            location: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn debug(message: impl Into<String>) -> Self {
        Self::new(Severity::Debug, message)
    }

    /// Attach the location this diagnostic is about.
    pub fn at(mut self, location: impl AsRef<Path>) -> Self {
        self.location = Some(location.as_ref().to_path_buf());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.location {
            Some(loc) => write!(f, "{} ({})", self.message, loc.display()),
            None => f.write_str(&self.message),
        }
    }
}

/// Receiver for diagnostics.
pub trait DiagnosticsSink {
    fn report(&self, diagnostic: Diagnostic);
}

/// Sink that emits each diagnostic as a `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        let location = diagnostic
            .location
            .as_ref()
            .map(|l| l.display().to_string())
            .unwrap_or_default();
        match diagnostic.severity {
            Severity::Debug => {
                tracing::debug!(event = "diagnostic", location = %location, "{}", diagnostic.message)
            }
            Severity::Info => {
                tracing::info!(event = "diagnostic", location = %location, "{}", diagnostic.message)
            }
            Severity::Warning => {
                tracing::warn!(event = "diagnostic", location = %location, "{}", diagnostic.message)
            }
            Severity::Error => {
                tracing::error!(event = "diagnostic", location = %location, "{}", diagnostic.message)
            }
        }
    }
}

/// In-memory sink (testing only).
#[derive(Debug, Default)]
pub struct MemorySink {
    reported: RefCell<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything reported so far, in order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.reported.borrow().clone()
    }

    /// Diagnostics at `Severity::Error`.
    pub fn errors(&self) -> Vec<Diagnostic> {
        self.reported
            .borrow()
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .cloned()
            .collect()
    }
}

impl DiagnosticsSink for MemorySink {
    fn report(&self, diagnostic: Diagnostic) {
        self.reported.borrow_mut().push(diagnostic);
    }
}
