//! Error types and exit codes for the planner
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (IO, transport, serialization)
//! - 2: Usage error (bad flags/args, invalid values)
//! - 3: Data/store error (malformed documents, rejected store requests)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data/store error (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<rusqlite::Error> for PlannerError {
    fn from(err: rusqlite::Error) -> Self {
        PlannerError::Sqlite(err.to_string())
    }
}

impl From<tokio::task::JoinError> for PlannerError {
    fn from(err: tokio::task::JoinError) -> Self {
        PlannerError::Other(format!("background task failed: {}", err))
    }
}

/// Errors that can occur during planner operations
#[derive(Error, Debug)]
pub enum PlannerError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    #[error("unsupported {context}: {value} (supported: {supported})")]
    Unsupported {
        context: String,
        value: String,
        supported: String,
    },

    // Data/store errors (exit code 3)
    #[error("malformed document at {path}: {reason}")]
    MalformedDocument { path: String, reason: String },

    #[error("store rejected {method} {url}: HTTP {status}")]
    HttpStatus {
        method: String,
        url: String,
        status: u16,
    },

    #[error("invalid config in {path:?}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("SQLite error: {0}")]
    Sqlite(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl PlannerError {
    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        PlannerError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        PlannerError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an unsupported value
    pub fn unsupported(
        context: &str,
        value: impl std::fmt::Display,
        supported: impl std::fmt::Display,
    ) -> Self {
        PlannerError::Unsupported {
            context: context.to_string(),
            value: value.to_string(),
            supported: supported.to_string(),
        }
    }

    /// Create an error for a stored document that does not have the expected shape
    pub fn malformed(path: &str, reason: impl std::fmt::Display) -> Self {
        PlannerError::MalformedDocument {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            PlannerError::UnknownFormat(_)
            | PlannerError::UsageError(_)
            | PlannerError::InvalidValue { .. }
            | PlannerError::Unsupported { .. } => ExitCode::Usage,

            PlannerError::MalformedDocument { .. }
            | PlannerError::HttpStatus { .. }
            | PlannerError::InvalidConfig { .. } => ExitCode::Data,

            PlannerError::Io(_)
            | PlannerError::Json(_)
            | PlannerError::Toml(_)
            | PlannerError::Sqlite(_)
            | PlannerError::Transport(_)
            | PlannerError::FailedOperationWithTarget { .. }
            | PlannerError::Other(_) => ExitCode::Failure,
        }
    }

    /// Stable identifier used in the JSON error envelope
    pub fn error_type(&self) -> &'static str {
        match self {
            PlannerError::UnknownFormat(_) => "unknown_format",
            PlannerError::UsageError(_) => "usage_error",
            PlannerError::InvalidValue { .. } => "invalid_value",
            PlannerError::Unsupported { .. } => "unsupported",
            PlannerError::MalformedDocument { .. } => "malformed_document",
            PlannerError::HttpStatus { .. } => "http_status",
            PlannerError::InvalidConfig { .. } => "invalid_config",
            PlannerError::Io(_) => "io_error",
            PlannerError::Json(_) => "json_error",
            PlannerError::Toml(_) => "toml_error",
            PlannerError::Sqlite(_) => "sqlite_error",
            PlannerError::Transport(_) => "transport_error",
            PlannerError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            PlannerError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for planner operations
pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_errors_exit_2() {
        assert_eq!(
            PlannerError::UsageError("bad".into()).exit_code(),
            ExitCode::Usage
        );
        assert_eq!(
            PlannerError::invalid_value("attribute", "x").exit_code(),
            ExitCode::Usage
        );
        assert_eq!(
            PlannerError::UnknownFormat("xml".into()).exit_code(),
            ExitCode::Usage
        );
    }

    #[test]
    fn test_store_errors_exit_3() {
        let err = PlannerError::HttpStatus {
            method: "PUT".into(),
            url: "http://localhost/locationGraph.json".into(),
            status: 401,
        };
        assert_eq!(err.exit_code(), ExitCode::Data);
        assert_eq!(
            PlannerError::malformed("locationGraph", "not an object").exit_code(),
            ExitCode::Data
        );
    }

    #[test]
    fn test_io_error_exit_1() {
        let err: PlannerError = std::io::Error::other("disk full").into();
        assert_eq!(err.exit_code(), ExitCode::Failure);
        assert_eq!(i32::from(err.exit_code()), 1);
    }

    #[test]
    fn test_to_json_envelope() {
        let err = PlannerError::malformed("locationGraph", "expected an object");
        let json = err.to_json();
        assert_eq!(json["error"]["code"], 3);
        assert_eq!(json["error"]["type"], "malformed_document");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("expected an object"));
    }
}
