use crate::shell::command::{Command, ShellEvent};
use crate::shell::result::{CommandResult, FailureReason};
use crate::shell::session::ShellSession;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct CommandExecutor {
    shell: Arc<dyn ShellSession>,
}

impl CommandExecutor {
    pub fn new(shell: Arc<dyn ShellSession>) -> Self {
        Self { shell }
    }

    pub fn shell(&self) -> &Arc<dyn ShellSession> {
        &self.shell
    }

    /// Runs `command` in the session and blocks until it completes. Session errors are
    /// folded into the returned result; nothing is propagated.
    pub fn run_command(&self, command: &str) -> CommandResult {
        let mut builder = CommandResult::builder();
        if command.trim().is_empty() {
            return builder.fail(FailureReason::EmptyInput);
        }

        let command = Command::new(command);
        let id = command.id();
        debug!(id, command = command.text(), "running shell command");

        let outcome = self.shell.execute(command, &mut |event| match event {
            ShellEvent::Output { id: line_id, line } if line_id == id => {
                builder.append_line(&line);
            }
            ShellEvent::Finished { id: done_id } if done_id == id => {
                debug!(id, "shell command finished");
            }
            _ => {}
        });

        match outcome {
            Ok(()) => builder.build(),
            Err(e) => {
                let reason = e.failure_reason();
                warn!(id, %reason, error = %e, "shell command failed");
                builder.fail(reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::fake::ScriptedShell;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_input_never_reaches_the_session() {
        let shell = Arc::new(ScriptedShell::new());
        let executor = CommandExecutor::new(shell.clone());
        for text in ["", "   ", "\n"] {
            let result = executor.run_command(text);
            assert!(!result.succeeded());
            assert_eq!(result.failure(), Some(FailureReason::EmptyInput));
        }
        assert!(shell.commands().is_empty());
    }

    #[test]
    fn output_is_accumulated_in_order() {
        let shell = Arc::new(ScriptedShell::new().respond("ls", &["b", "a", "c"]));
        let executor = CommandExecutor::new(shell.clone());
        let result = executor.run_command("ls /data");
        assert!(result.succeeded());
        assert_eq!(result.message(), "b\na\nc\n");
        assert_eq!(shell.commands(), vec!["ls /data"]);
    }

    /// Emits one line for the command and one for a stale id, then returns without
    /// sending `Finished`.
    struct StraySession;

    impl ShellSession for StraySession {
        fn execute(
            &self,
            command: Command,
            events: &mut dyn FnMut(ShellEvent),
        ) -> crate::core::Result<()> {
            let id = command.id();
            events(ShellEvent::Output { id: id + 1_000_000, line: "stale".to_string() });
            events(ShellEvent::Output { id, line: "mine".to_string() });
            Ok(())
        }
    }

    #[test]
    fn only_lines_for_this_command_are_kept() {
        let result = CommandExecutor::new(Arc::new(StraySession)).run_command("id");
        assert!(result.succeeded());
        assert_eq!(result.message(), "mine\n");
    }

    #[test]
    fn silent_command_succeeds_with_empty_message() {
        let executor = CommandExecutor::new(Arc::new(ScriptedShell::new()));
        let result = executor.run_command("true");
        assert!(result.succeeded());
        assert_eq!(result.message(), "");
    }

    #[test]
    fn timeout_keeps_partial_output() {
        let shell = ScriptedShell::new().fail_after("logcat", &["first"], FailureReason::Timeout);
        let executor = CommandExecutor::new(Arc::new(shell));
        let result = executor.run_command("logcat");
        assert!(!result.succeeded());
        assert_eq!(result.failure(), Some(FailureReason::Timeout));
        assert_eq!(result.message(), "first\n");
    }

    #[test]
    fn each_session_failure_maps_to_its_reason() {
        for reason in [
            FailureReason::Interrupted,
            FailureReason::IoFailure,
            FailureReason::Timeout,
            FailureReason::PermissionDenied,
        ] {
            let shell = ScriptedShell::new().fail_after("id", &[], reason);
            let result = CommandExecutor::new(Arc::new(shell)).run_command("id");
            assert_eq!(result.failure(), Some(reason));
            assert_eq!(result.message(), "");
        }
    }
}
