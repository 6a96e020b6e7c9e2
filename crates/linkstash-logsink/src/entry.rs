use crate::error::SinkError;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

const FRONTEND_PACKAGES: &[&str] = &[
    "api",
    "component",
    "hook",
    "page",
    "state",
    "style",
    "handler",
];
const BACKEND_PACKAGES: &[&str] = &["handler", "middleware", "service", "database", "util"];

/// Which half of the system emitted the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStack {
    Frontend,
    Backend,
}

impl LogStack {
    fn allowed_packages(self) -> &'static [&'static str] {
        match self {
            LogStack::Frontend => FRONTEND_PACKAGES,
            LogStack::Backend => BACKEND_PACKAGES,
        }
    }
}

impl Display for LogStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogStack::Frontend => f.write_str("frontend"),
            LogStack::Backend => f.write_str("backend"),
        }
    }
}

/// Severity of the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

/// One diagnostic log entry, as accepted by the collector endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub stack: LogStack,
    pub level: LogLevel,
    /// Originating package; validated against a per-stack allowlist.
    pub package: String,
    pub message: String,
    pub timestamp: Timestamp,
}

impl LogEntry {
    /// Builds a validated entry.
    ///
    /// The package must be on the allowlist for its stack, and the
    /// message must be non-empty.
    pub fn new(
        stack: LogStack,
        level: LogLevel,
        package: impl Into<String>,
        message: impl Into<String>,
        timestamp: Timestamp,
    ) -> Result<Self, SinkError> {
        let package = package.into().to_lowercase();
        let message = message.into();

        if !stack.allowed_packages().contains(&package.as_str()) {
            return Err(SinkError::InvalidEntry(format!(
                "package for {} must be one of: {}",
                stack,
                stack.allowed_packages().join(", ")
            )));
        }
        if message.is_empty() {
            return Err(SinkError::InvalidEntry(
                "message must be non-empty".to_string(),
            ));
        }

        Ok(Self {
            stack,
            level,
            package,
            message,
            timestamp,
        })
    }
}
