//! Structured error types shared across the heapmatch crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payload carried by every [`HeapError`] variant.
///
/// `code` is a stable kebab or snake case identifier such as
/// `malformed-step` that tests and callers match on; `context` pins the
/// failing spot (step index, heap size, option name, file path).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable identifier of the failure.
    pub code: String,
    /// Diagnostic for humans.
    pub message: String,
    /// Where the failure happened, e.g. `step=3`, `heap_size=10`.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// How to fix the input, when there is a known fix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a payload without context or hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records one context entry; any displayable value is accepted.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Attaches a remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the build-heap matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum HeapError {
    /// Invalid or unsupported matching configuration.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Recording could not be turned into a trace.
    #[error("trace error: {0}")]
    Trace(ErrorInfo),
    /// Simulator invoked with arguments outside the heap model.
    #[error("simulation error: {0}")]
    Simulation(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
    /// File system access errors.
    #[error("io error: {0}")]
    Io(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.message, self.code)?;
        let mut separator = " at ";
        for (key, value) in &self.context {
            write!(f, "{separator}{key}={value}")?;
            separator = ", ";
        }
        match &self.hint {
            Some(hint) => write!(f, "; hint: {hint}"),
            None => Ok(()),
        }
    }
}

impl HeapError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            HeapError::Config(info)
            | HeapError::Trace(info)
            | HeapError::Simulation(info)
            | HeapError::Serde(info)
            | HeapError::Io(info) => info,
        }
    }

    /// Builds a [`HeapError::Trace`] without context.
    pub fn trace(code: &str, message: impl Into<String>) -> Self {
        HeapError::Trace(ErrorInfo::new(code, message))
    }

    /// Builds a [`HeapError::Serde`] from any displayable decoder error.
    pub fn serde(code: &str, err: impl ToString) -> Self {
        HeapError::Serde(ErrorInfo::new(code, err.to_string()))
    }

    /// Builds a [`HeapError::Io`] from any displayable I/O error.
    pub fn io(code: &str, err: impl ToString) -> Self {
        HeapError::Io(ErrorInfo::new(code, err.to_string()))
    }
}
