use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    Interrupted,
    IoFailure,
    Timeout,
    PermissionDenied,
    EmptyInput,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureReason::Interrupted => "interrupted",
            FailureReason::IoFailure => "io failure",
            FailureReason::Timeout => "timeout",
            FailureReason::PermissionDenied => "permission denied",
            FailureReason::EmptyInput => "empty input",
        };
        f.write_str(s)
    }
}

/// Outcome of one command execution. Only a [`CommandResultBuilder`] can produce one, so
/// `succeeded` is true exactly when `failure` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    succeeded: bool,
    message: String,
    failure: Option<FailureReason>,
}

impl CommandResult {
    pub fn builder() -> CommandResultBuilder {
        CommandResultBuilder::default()
    }
    pub fn succeeded(&self) -> bool {
        self.succeeded
    }
    pub fn message(&self) -> &str {
        &self.message
    }
    pub fn failure(&self) -> Option<FailureReason> {
        self.failure
    }
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.message.lines()
    }
}

#[derive(Debug, Default)]
pub struct CommandResultBuilder {
    message: String,
}

impl CommandResultBuilder {
    pub fn append_line(&mut self, line: &str) -> &mut Self {
        self.message.push_str(line);
        self.message.push('\n');
        self
    }
    pub fn build(self) -> CommandResult {
        CommandResult {
            succeeded: true,
            message: self.message,
            failure: None,
        }
    }
    pub fn fail(self, reason: FailureReason) -> CommandResult {
        CommandResult {
            succeeded: false,
            message: self.message,
            failure: Some(reason),
        }
    }
}
