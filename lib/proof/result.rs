//! Proof result types.

use serde::Serialize;
use std::fmt;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Diagnostic severity, ordered by increasing fatality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Advisory, no action implied.
    Info,
    /// Quality issue that does not fail the proof.
    Warn,
    /// Violation; the proof fails.
    Err,
    /// The charm cannot be analyzed further.
    Crit,
}

/// A single proof finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Severity level.
    pub severity: Severity,

    /// Human-readable message.
    pub message: String,
}

/// Accumulated diagnostics for one proof run.
///
/// Owned by the orchestrator for the length of a run and passed by reference
/// into every validator. Diagnostics are append-only.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// Diagnostics in the order they were recorded.
    pub diagnostics: Vec<Diagnostic>,

    /// Set when a `crit` was recorded.
    #[serde(skip)]
    fatal: bool,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Severity {
    /// Short label used in rendered output.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "I",
            Severity::Warn => "W",
            Severity::Err => "E",
            Severity::Crit => "C",
        }
    }
}

impl ValidationResult {
    /// Record an advisory diagnostic.
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Severity::Info, message);
    }

    /// Record a warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(Severity::Warn, message);
    }

    /// Record an error.
    pub fn err(&mut self, message: impl Into<String>) {
        self.push(Severity::Err, message);
    }

    /// Record a critical diagnostic. The caller stops the checks that depend on
    /// whatever could not be loaded.
    pub fn crit(&mut self, message: impl Into<String>) {
        self.fatal = true;
        self.push(Severity::Crit, message);
    }

    fn push(&mut self, severity: Severity, message: impl Into<String>) {
        let message = message.into();
        tracing::trace!(?severity, %message, "diagnostic");
        self.diagnostics.push(Diagnostic { severity, message });
    }

    /// Returns true if a `crit` was recorded.
    pub fn is_fatal(&self) -> bool {
        self.fatal
    }

    /// Returns true if there are no `err` or `crit` diagnostics.
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.iter().any(|d| d.severity >= Severity::Err)
    }

    /// Returns true if there are no diagnostics above `info`.
    pub fn is_strict_valid(&self) -> bool {
        !self.diagnostics.iter().any(|d| d.severity >= Severity::Warn)
    }

    /// Highest severity recorded, if any.
    pub fn max_severity(&self) -> Option<Severity> {
        self.diagnostics.iter().map(|d| d.severity).max()
    }

    /// Diagnostics of exactly the given severity.
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.severity == severity)
    }

    /// Number of diagnostics of exactly the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.with_severity(severity).count()
    }

    /// Exit code for the run: `-1` after a `crit`, `1` if any `err` was
    /// recorded, `0` otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.fatal {
            -1
        } else if self.is_valid() {
            0
        } else {
            1
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Err => "err",
            Severity::Crit => "crit",
        };
        write!(f, "{}", name)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity.label(), self.message)
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
