//! Result type definitions

use crate::core::codec::DecodeError;
use thiserror::Error;

/// Core error types
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    #[error("Other error: {0}")]
    Other(String),
}

// Implement From<String> for CoreError to allow using ? with String errors
impl From<String> for CoreError {
    fn from(s: String) -> Self {
        CoreError::Other(s)
    }
}

impl From<&str> for CoreError {
    fn from(s: &str) -> Self {
        CoreError::Other(s.to_string())
    }
}

/// Core result type
pub type CoreResult<T> = Result<T, CoreError>;

/// Failures surfaced by the external editing tool
///
/// Never fatal to a run: callers downgrade these to per-edit statuses or
/// run-log warnings.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("host unavailable: {0}")]
    Unavailable(String),

    #[error("host call failed: {0}")]
    CallFailed(String),

    #[error("malformed host reply: {0}")]
    BadResponse(String),
}

/// Tool call result type
pub type ToolResult<T> = Result<T, ToolError>;
