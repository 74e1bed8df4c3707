use crate::shell::{CommandExecutor, CommandResult};

/// Permission bits granted to or revoked from "other".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAccess {
    Read,
    Write,
    Execute,
    Full,
}

impl FileAccess {
    fn bits(self) -> &'static str {
        match self {
            FileAccess::Read => "r",
            FileAccess::Write => "rw",
            FileAccess::Execute => "x",
            FileAccess::Full => "rwx",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalPairResult {
    pub database: CommandResult,
    pub journal: CommandResult,
}

impl JournalPairResult {
    pub fn succeeded(&self) -> bool {
        self.database.succeeded() && self.journal.succeeded()
    }
}

#[derive(Clone)]
pub struct FileModes {
    executor: CommandExecutor,
    journal_suffix: String,
}

impl FileModes {
    pub fn new(executor: CommandExecutor, journal_suffix: impl Into<String>) -> Self {
        Self {
            executor,
            journal_suffix: journal_suffix.into(),
        }
    }

    pub fn chmod(&self, path: &str, access: FileAccess, grant: bool) -> CommandResult {
        let sign = if grant { '+' } else { '-' };
        self.executor
            .run_command(&format!("chmod o{}{} {}", sign, access.bits(), path))
    }

    /// Applies the change to the database and then to its journal. Both commands are
    /// issued whatever the first one returns.
    pub fn chmod_with_journal(&self, path: &str, access: FileAccess, grant: bool) -> JournalPairResult {
        let database = self.chmod(path, access, grant);
        let journal = self.chmod(&format!("{}{}", path, self.journal_suffix), access, grant);
        JournalPairResult { database, journal }
    }

    pub fn request_read_permission(&self, path: &str) -> CommandResult {
        self.chmod(path, FileAccess::Read, true)
    }

    pub fn cancel_read_permission(&self, path: &str) -> CommandResult {
        self.chmod(path, FileAccess::Read, false)
    }

    pub fn request_write_permission(&self, path: &str) -> CommandResult {
        self.chmod(path, FileAccess::Write, true)
    }

    pub fn cancel_write_permission(&self, path: &str) -> CommandResult {
        self.chmod(path, FileAccess::Write, false)
    }

    pub fn request_execute_permission(&self, path: &str) -> CommandResult {
        self.chmod(path, FileAccess::Execute, true)
    }

    pub fn cancel_execute_permission(&self, path: &str) -> CommandResult {
        self.chmod(path, FileAccess::Execute, false)
    }

    pub fn request_full_permission(&self, path: &str) -> CommandResult {
        self.chmod(path, FileAccess::Full, true)
    }

    pub fn cancel_full_permission(&self, path: &str) -> CommandResult {
        self.chmod(path, FileAccess::Full, false)
    }

    pub fn request_read_db_with_journal_permission(&self, path: &str) -> JournalPairResult {
        self.chmod_with_journal(path, FileAccess::Read, true)
    }

    pub fn cancel_read_db_with_journal_permission(&self, path: &str) -> JournalPairResult {
        self.chmod_with_journal(path, FileAccess::Read, false)
    }

    pub fn request_write_db_with_journal_permission(&self, path: &str) -> JournalPairResult {
        self.chmod_with_journal(path, FileAccess::Write, true)
    }

    pub fn cancel_write_db_with_journal_permission(&self, path: &str) -> JournalPairResult {
        self.chmod_with_journal(path, FileAccess::Write, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::fake::ScriptedShell;
    use crate::shell::FailureReason;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn modes(shell: &Arc<ScriptedShell>) -> FileModes {
        FileModes::new(CommandExecutor::new(shell.clone()), "-journal")
    }

    #[test]
    fn write_db_touches_database_and_journal() {
        let shell = Arc::new(ScriptedShell::new());
        let result = modes(&shell).request_write_db_with_journal_permission("/data/app.db");
        assert!(result.succeeded());
        assert_eq!(
            shell.commands(),
            vec!["chmod o+rw /data/app.db", "chmod o+rw /data/app.db-journal"]
        );
    }

    #[test]
    fn journal_command_runs_even_if_database_fails() {
        // The journal script is registered first so its longer prefix wins.
        let shell = Arc::new(
            ScriptedShell::new()
                .respond("chmod o-r /data/app.db-journal", &[])
                .fail_after("chmod o-r /data/app.db", &[], FailureReason::PermissionDenied),
        );
        let result = modes(&shell).cancel_read_db_with_journal_permission("/data/app.db");
        assert!(!result.succeeded());
        assert_eq!(result.database.failure(), Some(FailureReason::PermissionDenied));
        assert!(result.journal.succeeded());
        assert_eq!(shell.commands().len(), 2);
    }

    #[test]
    fn single_file_toggles_use_other_bits() {
        let shell = Arc::new(ScriptedShell::new());
        let modes = modes(&shell);
        modes.request_read_permission("/a");
        modes.cancel_read_permission("/a");
        modes.request_write_permission("/a");
        modes.cancel_write_permission("/a");
        modes.request_execute_permission("/a");
        modes.cancel_execute_permission("/a");
        modes.request_full_permission("/a");
        modes.cancel_full_permission("/a");
        assert_eq!(
            shell.commands(),
            vec![
                "chmod o+r /a",
                "chmod o-r /a",
                "chmod o+rw /a",
                "chmod o-rw /a",
                "chmod o+x /a",
                "chmod o-x /a",
                "chmod o+rwx /a",
                "chmod o-rwx /a",
            ]
        );
    }
}
