use crate::shell::FailureReason;
use thiserror::Error;
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Interrupted while waiting for the shell")]
    Interrupted,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Shell timeout after {0}ms")]
    Timeout(u64),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
impl ShellError {
    /// Classifies the error into the failure taxonomy carried by a `CommandResult`.
    pub fn failure_reason(&self) -> FailureReason {
        match self {
            ShellError::Interrupted => FailureReason::Interrupted,
            ShellError::Io(e) if e.kind() == std::io::ErrorKind::Interrupted => {
                FailureReason::Interrupted
            }
            ShellError::Timeout(_) => FailureReason::Timeout,
            ShellError::PermissionDenied(_) => FailureReason::PermissionDenied,
            ShellError::Io(_) | ShellError::Config(_) | ShellError::Json(_) => {
                FailureReason::IoFailure
            }
        }
    }
}
pub type Result<T> = std::result::Result<T, ShellError>;
