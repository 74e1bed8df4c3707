pub mod command;
pub mod executor;
#[cfg(test)]
pub(crate) mod fake;
pub mod process;
pub mod result;
pub mod session;
pub use command::{Command, ShellEvent};
pub use executor::CommandExecutor;
pub use process::ProcessShell;
pub use result::{CommandResult, CommandResultBuilder, FailureReason};
pub use session::ShellSession;
