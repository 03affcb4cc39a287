//! Unified error types for dep-age-audit.
//!
//! Per-item failures (a malformed listing line, a registry lookup that times
//! out, a missing local artifact) are *not* represented here; they downgrade
//! the affected coordinate to an "unknown" or "violation" report entry. This
//! hierarchy covers the fatal paths: build-tool invocation, cache
//! persistence, vendor copies and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for dep-age-audit operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AuditError {
    /// The external build-tool invocation exited non-zero.
    ///
    /// The carried code is propagated verbatim as the process exit status.
    #[error("build tool invocation failed with exit code {code}")]
    BuildTool { code: i32 },

    /// The build tool's local repository location could not be determined.
    #[error("cannot determine local repository: {0}")]
    LocalRepository(String),

    /// Copying an artifact into the vendor store failed.
    #[error("vendoring {gav} failed: {message}")]
    Vendor { gav: String, message: String },

    /// Persisting the timestamp cache failed.
    #[error("cache persistence failed at {path}: {message}")]
    Cache { path: PathBuf, message: String },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Convenient Result type for dep-age-audit operations.
pub type Result<T> = std::result::Result<T, AuditError>;

impl AuditError {
    /// Create an IO error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a vendoring error for a coordinate.
    pub fn vendor(gav: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Vendor {
            gav: gav.into(),
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<std::io::Error> for AuditError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}
