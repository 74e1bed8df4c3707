use crate::core::Result;
use crate::shell::command::{Command, ShellEvent};

/// An execution channel, privileged or not, that runs commands to completion.
///
/// `execute` blocks until the command finishes, fails or times out. Output lines are
/// pushed into `events` as they arrive, followed by one `ShellEvent::Finished`. On
/// failure, lines already delivered stay delivered and no `Finished` is sent.
pub trait ShellSession: Send + Sync {
    fn execute(&self, command: Command, events: &mut dyn FnMut(ShellEvent)) -> Result<()>;
}
