use crate::core::config::COMMAND_ID;
use crate::shell::{Command, FailureReason, ShellEvent, ShellSession};
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, info, warn};

pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Result of the most recent live `id` check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "reason")]
pub enum PermissionOutcome {
    Granted,
    /// The shell ran but did not report uid 0.
    NotRoot,
    Failed(FailureReason),
}

impl PermissionOutcome {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionOutcome::Granted)
    }
}

#[derive(Debug)]
struct PermissionState {
    outcome: PermissionOutcome,
    last_check_millis: Option<i64>,
}

impl Default for PermissionState {
    fn default() -> Self {
        Self {
            outcome: PermissionOutcome::NotRoot,
            last_check_millis: None,
        }
    }
}

/// Caches whether this process holds root, refreshing at most once per TTL.
///
/// The staleness test and the live check run under one lock, so concurrent callers
/// share a single elevation prompt.
pub struct PermissionManager {
    shell: Arc<dyn ShellSession>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    state: Mutex<PermissionState>,
}

impl PermissionManager {
    pub fn new(shell: Arc<dyn ShellSession>, ttl: Duration) -> Self {
        Self::with_clock(shell, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(shell: Arc<dyn ShellSession>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            shell,
            ttl,
            clock,
            state: Mutex::new(PermissionState::default()),
        }
    }

    pub fn request_root_permission(&self) -> bool {
        self.check_root_permission().is_granted()
    }

    pub fn check_root_permission(&self) -> PermissionOutcome {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let now = self.clock.now_millis();
        let stale = match state.last_check_millis {
            None => true,
            Some(last) => now.saturating_sub(last) > self.ttl.as_millis() as i64,
        };
        if !stale {
            return state.outcome;
        }

        let outcome = self.access_root();
        state.outcome = outcome;
        state.last_check_millis = Some(self.clock.now_millis());
        outcome
    }

    /// Outcome of the last live check, without triggering one.
    pub fn cached(&self) -> Option<PermissionOutcome> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.last_check_millis.map(|_| state.outcome)
    }

    pub fn last_check_millis(&self) -> Option<i64> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last_check_millis
    }

    pub fn invalidate(&self) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = PermissionState::default();
    }

    fn access_root(&self) -> PermissionOutcome {
        let command = Command::new(COMMAND_ID);
        let id = command.id();
        let mut uid_zero = false;
        let result = self.shell.execute(command, &mut |event| {
            if let ShellEvent::Output { id: line_id, line } = event {
                if line_id == id && line.to_lowercase().contains("uid=0") {
                    uid_zero = true;
                }
            }
        });
        match result {
            Ok(()) if uid_zero => {
                info!("root permission granted");
                PermissionOutcome::Granted
            }
            Ok(()) => {
                debug!("id did not report uid 0");
                PermissionOutcome::NotRoot
            }
            Err(e) => {
                warn!(error = %e, "root permission check failed");
                PermissionOutcome::Failed(e.failure_reason())
            }
        }
    }
}
