use crate::core::{Config, Result};
use crate::ops::{
    DeviceProps, FileAccess, FileModes, FileOps, JournalPairResult, MountEntry, Mounts,
    ProcessManager, ScreenOps,
};
use crate::root::{Clock, PermissionManager, PermissionOutcome, RootDetector, SystemClock};
use crate::shell::{CommandExecutor, CommandResult, ProcessShell, ShellSession};
use std::sync::Arc;

/// Root state and privileged operations for one process. Build it once at startup
/// and pass it by reference.
pub struct Roots {
    config: Config,
    detector: RootDetector,
    permissions: PermissionManager,
    executor: CommandExecutor,
    modes: FileModes,
    mounts: Mounts,
    files: FileOps,
    processes: ProcessManager,
    screen: ScreenOps,
    device: Arc<DeviceProps>,
}

impl Roots {
    /// Uses a `ProcessShell` running the su binary.
    pub fn new(config: Config) -> Result<Self> {
        let shell = Arc::new(ProcessShell::root(&config)?);
        Ok(Self::with_shell(config, shell))
    }

    pub fn with_shell(config: Config, shell: Arc<dyn ShellSession>) -> Self {
        Self::with_shell_and_clock(config, shell, Arc::new(SystemClock))
    }

    pub fn with_shell_and_clock(
        config: Config,
        shell: Arc<dyn ShellSession>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let executor = CommandExecutor::new(shell.clone());
        let detector = RootDetector::from_config(&config);
        let permissions = PermissionManager::with_clock(shell, config.permission_ttl(), clock);
        let mounts = Mounts::new(executor.clone());
        let device = Arc::new(DeviceProps::new(executor.clone(), config.sdk_level));
        Self {
            detector,
            permissions,
            modes: FileModes::new(executor.clone(), config.journal_suffix.clone()),
            files: FileOps::new(executor.clone(), mounts.clone()),
            processes: ProcessManager::new(executor.clone()),
            screen: ScreenOps::new(executor.clone(), device.clone(), &config),
            mounts,
            device,
            executor,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
    pub fn detector(&self) -> &RootDetector {
        &self.detector
    }
    pub fn permissions(&self) -> &PermissionManager {
        &self.permissions
    }
    pub fn executor(&self) -> &CommandExecutor {
        &self.executor
    }
    pub fn file_modes(&self) -> &FileModes {
        &self.modes
    }
    pub fn mounts(&self) -> &Mounts {
        &self.mounts
    }
    pub fn files(&self) -> &FileOps {
        &self.files
    }
    pub fn processes(&self) -> &ProcessManager {
        &self.processes
    }
    pub fn screen(&self) -> &ScreenOps {
        &self.screen
    }
    pub fn device(&self) -> &DeviceProps {
        &self.device
    }

    pub fn has_rooted(&self) -> bool {
        self.detector.has_rooted()
    }

    pub fn request_root_permission(&self) -> bool {
        self.permissions.request_root_permission()
    }

    pub fn check_root_permission(&self) -> PermissionOutcome {
        self.permissions.check_root_permission()
    }

    pub fn run_command(&self, command: &str) -> CommandResult {
        self.executor.run_command(command)
    }

    pub fn remount(&self, path: &str, mode: &str) -> bool {
        self.mounts.remount(path, mode)
    }

    pub fn mount_table(&self) -> Vec<MountEntry> {
        self.mounts.mount_table()
    }

    pub fn copy_file(&self, source: &str, destination_dir: &str) -> bool {
        self.files.copy_file(source, destination_dir)
    }

    pub fn copy_file_to(&self, source: &str, destination: &str) -> bool {
        self.files.copy_file_to(source, destination)
    }

    pub fn screen_cap(&self, path: &str) -> bool {
        self.screen.screen_cap(path)
    }

    pub fn screen_record(&self, path: &str) -> bool {
        self.screen.screen_record(path)
    }

    pub fn screen_record_with(&self, path: &str, bit_rate: u64, time_limit: u64) -> bool {
        self.screen.screen_record_with(path, bit_rate, time_limit)
    }

    pub fn is_process_running(&self, name: &str) -> bool {
        self.processes.is_process_running(name)
    }

    pub fn kill_process(&self, pid: u32) -> bool {
        self.processes.kill_process(pid)
    }

    pub fn kill_process_by_name(&self, name: &str) -> bool {
        self.processes.kill_process_by_name(name)
    }

    pub fn restart_device(&self) -> bool {
        self.processes.restart_device()
    }

    pub fn chmod(&self, path: &str, access: FileAccess, grant: bool) -> CommandResult {
        self.modes.chmod(path, access, grant)
    }

    pub fn chmod_with_journal(&self, path: &str, access: FileAccess, grant: bool) -> JournalPairResult {
        self.modes.chmod_with_journal(path, access, grant)
    }
}
