use crate::core::{Result, ShellError};
use crate::shell::command::{Command, ShellEvent};
use crate::shell::result::FailureReason;
use crate::shell::session::ShellSession;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

struct Script {
    prefix: String,
    lines: Vec<String>,
    failure: Option<FailureReason>,
    once: bool,
    used: AtomicBool,
}

/// Records every submitted command and replays canned output by command prefix.
/// The first matching script wins. Unscripted commands finish with no output.
#[derive(Default)]
pub(crate) struct ScriptedShell {
    scripts: Vec<Script>,
    commands: Mutex<Vec<String>>,
}

impl ScriptedShell {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(mut self, prefix: &str, lines: &[&str]) -> Self {
        self.scripts.push(Script {
            prefix: prefix.to_string(),
            lines: lines.iter().map(|l| l.to_string()).collect(),
            failure: None,
            once: false,
            used: AtomicBool::new(false),
        });
        self
    }

    pub(crate) fn fail_after(mut self, prefix: &str, lines: &[&str], reason: FailureReason) -> Self {
        self.scripts.push(Script {
            prefix: prefix.to_string(),
            lines: lines.iter().map(|l| l.to_string()).collect(),
            failure: Some(reason),
            once: false,
            used: AtomicBool::new(false),
        });
        self
    }

    /// Fails the first matching command only; later ones fall through to the next script.
    pub(crate) fn fail_once(mut self, prefix: &str, reason: FailureReason) -> Self {
        self.scripts.push(Script {
            prefix: prefix.to_string(),
            lines: Vec::new(),
            failure: Some(reason),
            once: true,
            used: AtomicBool::new(false),
        });
        self
    }

    pub(crate) fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, text: &str) -> usize {
        self.commands().iter().filter(|c| c.as_str() == text).count()
    }
}

fn error_for(reason: FailureReason) -> ShellError {
    match reason {
        FailureReason::Interrupted => ShellError::Interrupted,
        FailureReason::Timeout => ShellError::Timeout(0),
        FailureReason::PermissionDenied => ShellError::PermissionDenied("scripted".into()),
        FailureReason::IoFailure | FailureReason::EmptyInput => {
            ShellError::Io(io::Error::new(io::ErrorKind::BrokenPipe, "scripted"))
        }
    }
}

impl ShellSession for ScriptedShell {
    fn execute(&self, command: Command, events: &mut dyn FnMut(ShellEvent)) -> Result<()> {
        self.commands.lock().unwrap().push(command.text().to_string());
        let id = command.id();
        let script = self
            .scripts
            .iter()
            .find(|s| {
                command.text().starts_with(&s.prefix)
                    && !(s.once && s.used.swap(true, Ordering::SeqCst))
            });
        if let Some(script) = script {
            for line in &script.lines {
                events(ShellEvent::Output { id, line: line.clone() });
            }
            if let Some(reason) = script.failure {
                return Err(error_for(reason));
            }
        }
        events(ShellEvent::Finished { id });
        Ok(())
    }
}
