//! Error-handler collaborator.
//!
//! The host decides what to do with reports; the generator itself always
//! unwinds after reporting an error.

use groupgen_model::Locator;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locator: Option<Locator>,
}

impl Diagnostic {
    pub fn warning(message: impl Into<String>, locator: Option<&Locator>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            locator: locator.cloned(),
        }
    }

    pub fn error(message: impl Into<String>, locator: Option<&Locator>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            locator: locator.cloned(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.locator {
            Some(locator) => write!(f, "{locator}: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

pub trait Diagnostics {
    fn error(&mut self, diagnostic: &Diagnostic);
    fn warning(&mut self, diagnostic: &Diagnostic);
}

/// Keeps every report in memory.
#[derive(Debug, Clone, Default)]
pub struct CollectingDiagnostics {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn error(&mut self, diagnostic: &Diagnostic) {
        self.errors.push(diagnostic.clone());
    }

    fn warning(&mut self, diagnostic: &Diagnostic) {
        self.warnings.push(diagnostic.clone());
    }
}
