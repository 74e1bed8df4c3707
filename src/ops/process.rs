use crate::core::config::{COMMAND_KILL, COMMAND_PIDOF, COMMAND_PS};
use crate::shell::CommandExecutor;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const RESTART_PROCESS: &str = "zygote";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessInfo {
    pub user: String,
    pub pid: u32,
    pub ppid: u32,
    pub name: String,
}

#[derive(Clone)]
pub struct ProcessManager {
    executor: CommandExecutor,
}

impl ProcessManager {
    pub fn new(executor: CommandExecutor) -> Self {
        Self { executor }
    }

    /// Plain substring search over the `ps` output, so `com.foo` also matches
    /// `com.foo.bar`.
    pub fn is_process_running(&self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        self.executor.run_command(COMMAND_PS).message().contains(name)
    }

    pub fn list_processes(&self) -> Vec<ProcessInfo> {
        let result = self.executor.run_command(COMMAND_PS);
        parse_ps_output(result.message())
    }

    pub fn pids_of(&self, name: &str) -> Vec<u32> {
        if name.is_empty() {
            return Vec::new();
        }
        let result = self.executor.run_command(&format!("{}{}", COMMAND_PIDOF, name));
        result
            .message()
            .split_whitespace()
            .filter_map(|pid| pid.parse().ok())
            .collect()
    }

    /// Kills every pid `pidof` reports for `name`. False when none is found or any
    /// kill fails.
    pub fn kill_process_by_name(&self, name: &str) -> bool {
        let pids = self.pids_of(name);
        if pids.is_empty() {
            debug!(name, "no pid found");
            return false;
        }
        pids.into_iter()
            .map(|pid| self.kill_process(pid))
            .fold(true, |all, ok| all && ok)
    }

    pub fn kill_process(&self, pid: u32) -> bool {
        self.executor
            .run_command(&format!("{}{}", COMMAND_KILL, pid))
            .succeeded()
    }

    /// Kills zygote; the system brings the framework back up.
    pub fn restart_device(&self) -> bool {
        info!("restarting device by killing {}", RESTART_PROCESS);
        self.kill_process_by_name(RESTART_PROCESS)
    }
}

fn parse_ps_output(output: &str) -> Vec<ProcessInfo> {
    let mut lines = output.lines();
    let Some(header) = lines.next() else {
        return Vec::new();
    };
    let columns: Vec<&str> = header.split_whitespace().collect();
    let position = |name: &str| columns.iter().position(|c| c.eq_ignore_ascii_case(name));
    let (Some(user_col), Some(pid_col)) = (position("USER"), position("PID")) else {
        return Vec::new();
    };
    let ppid_col = position("PPID");

    let mut processes = Vec::new();
    for line in lines {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < columns.len() {
            continue;
        }
        let Some(pid) = parts[pid_col].parse::<u32>().ok() else {
            continue;
        };
        processes.push(ProcessInfo {
            user: parts[user_col].to_string(),
            pid,
            ppid: ppid_col.and_then(|c| parts[c].parse().ok()).unwrap_or(0),
            name: parts.last().unwrap_or(&"").to_string(),
        });
    }
    processes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::fake::ScriptedShell;
    use crate::shell::FailureReason;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    const PS: &[&str] = &[
        "USER           PID  PPID     VSZ    RSS WCHAN            ADDR S NAME",
        "root             1     0 2236400  12232 do_epoll_wait       0 S init",
        "root           612     1 4312384 110212 do_sys_poll         0 S zygote64",
        "u0_a123       4321   612 5123456  98000 do_epoll_wait       0 S com.example.app",
    ];

    fn manager(shell: &Arc<ScriptedShell>) -> ProcessManager {
        ProcessManager::new(CommandExecutor::new(shell.clone()))
    }

    #[test]
    fn running_check_is_a_substring_match() {
        let shell = Arc::new(ScriptedShell::new().respond("ps", PS));
        let manager = manager(&shell);
        assert!(manager.is_process_running("com.example.app"));
        assert!(manager.is_process_running("com.example"));
        assert!(manager.is_process_running("zygote"));
        assert!(!manager.is_process_running("com.other"));
        assert!(!manager.is_process_running(""));
        assert_eq!(shell.count("ps"), 4);
    }

    #[test]
    fn kill_by_name_resolves_pid_first() {
        let shell = Arc::new(ScriptedShell::new().respond("pidof ", &["1234"]));
        assert!(manager(&shell).kill_process_by_name("com.example.app"));
        assert_eq!(shell.commands(), vec!["pidof com.example.app", "kill 1234"]);
    }

    #[test]
    fn kill_by_name_without_pid_is_false() {
        let shell = Arc::new(ScriptedShell::new());
        assert!(!manager(&shell).kill_process_by_name("ghost"));
        assert_eq!(shell.commands(), vec!["pidof ghost"]);
    }

    #[test]
    fn every_pid_is_killed() {
        let shell = Arc::new(
            ScriptedShell::new()
                .respond("pidof ", &["12 34"])
                .fail_after("kill 34", &[], FailureReason::PermissionDenied),
        );
        assert!(!manager(&shell).kill_process_by_name("svc"));
        assert_eq!(shell.commands(), vec!["pidof svc", "kill 12", "kill 34"]);
    }

    #[test]
    fn restart_kills_zygote() {
        let shell = Arc::new(ScriptedShell::new().respond("pidof zygote", &["612"]));
        assert!(manager(&shell).restart_device());
        assert_eq!(shell.commands(), vec!["pidof zygote", "kill 612"]);
    }

    #[test]
    fn ps_rows_are_parsed() {
        let shell = Arc::new(ScriptedShell::new().respond("ps", PS));
        let processes = manager(&shell).list_processes();
        assert_eq!(processes.len(), 3);
        assert_eq!(
            processes[2],
            ProcessInfo {
                user: "u0_a123".to_string(),
                pid: 4321,
                ppid: 612,
                name: "com.example.app".to_string(),
            }
        );
    }
}
