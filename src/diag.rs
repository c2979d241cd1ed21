//! Operator-visible diagnostics
//!
//! Structural anomalies (missing parents, depth overflow, cycles) and other
//! observations are reported through a sink rather than through error returns,
//! so rendering always completes. Entries serialize to NDJSON for `--json`
//! mode.

use serde::Serialize;

/// How loud a diagnostic is. None of these halt rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A single diagnostic entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Which subsystem reported it ("menu", "calendar", "config", ...)
    pub component: &'static str,
    pub message: String,
}

impl Diagnostic {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Sink for diagnostics emitted during building and rendering.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);

    fn info(&mut self, component: &'static str, message: String) {
        self.emit(Diagnostic {
            severity: Severity::Info,
            component,
            message,
        });
    }

    fn warn(&mut self, component: &'static str, message: String) {
        self.emit(Diagnostic {
            severity: Severity::Warning,
            component,
            message,
        });
    }

    fn error(&mut self, component: &'static str, message: String) {
        self.emit(Diagnostic {
            severity: Severity::Error,
            component,
            message,
        });
    }
}

/// Collects diagnostics in memory for later printing or assertions.
#[derive(Debug, Clone, Default)]
pub struct CollectedDiagnostics {
    pub entries: Vec<Diagnostic>,
}

impl CollectedDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|d| d.message.contains(needle))
    }
}

impl DiagnosticSink for CollectedDiagnostics {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }
}

/// Sink that drops everything. For callers that only need the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&mut self, _diagnostic: Diagnostic) {}
}
