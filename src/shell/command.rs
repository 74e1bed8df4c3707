use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_COMMAND_ID: AtomicU64 = AtomicU64::new(1);

/// A single shell command. Ids come from a process-wide counter and are never reused.
/// Sessions take a `Command` by value, so each one is submitted at most once.
#[derive(Debug, PartialEq, Eq)]
pub struct Command {
    id: u64,
    text: String,
}

impl Command {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: NEXT_COMMAND_ID.fetch_add(1, Ordering::Relaxed),
            text: text.into(),
        }
    }
    pub fn id(&self) -> u64 {
        self.id
    }
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// What a session reports while running a command. `Finished` comes exactly once,
/// after every `Output` for the same id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    Output { id: u64, line: String },
    Finished { id: u64 },
}

impl ShellEvent {
    pub fn id(&self) -> u64 {
        match self {
            ShellEvent::Output { id, .. } | ShellEvent::Finished { id } => *id,
        }
    }
}
