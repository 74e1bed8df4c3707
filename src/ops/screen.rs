use crate::core::config::{COMMAND_SCREENCAP, COMMAND_SCREENRECORD};
use crate::core::Config;
use crate::ops::device::DeviceProps;
use crate::shell::CommandExecutor;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct ScreenOps {
    executor: CommandExecutor,
    device: Arc<DeviceProps>,
    default_bit_rate: u64,
    default_time_limit: u64,
    min_record_sdk: u32,
}

impl ScreenOps {
    pub fn new(executor: CommandExecutor, device: Arc<DeviceProps>, config: &Config) -> Self {
        Self {
            executor,
            device,
            default_bit_rate: config.screenrecord_bit_rate,
            default_time_limit: config.screenrecord_time_limit,
            min_record_sdk: config.min_screenrecord_sdk,
        }
    }

    pub fn screen_cap(&self, path: &str) -> bool {
        if path.is_empty() {
            return false;
        }
        self.executor
            .run_command(&format!("{}{}", COMMAND_SCREENCAP, path))
            .succeeded()
    }

    pub fn screen_record(&self, path: &str) -> bool {
        self.screen_record_with(path, self.default_bit_rate, self.default_time_limit)
    }

    /// Records the screen to `path`. `bit_rate` is in bits per second and
    /// `time_limit` in seconds. Needs `screenrecord`, which exists from KitKat on.
    pub fn screen_record_with(&self, path: &str, bit_rate: u64, time_limit: u64) -> bool {
        if path.is_empty() || !self.recording_supported() {
            return false;
        }
        let command = format!(
            "{}--bit-rate {} --time-limit {} {}",
            COMMAND_SCREENRECORD, bit_rate, time_limit, path
        );
        self.executor.run_command(&command).succeeded()
    }

    pub fn recording_supported(&self) -> bool {
        match self.device.sdk_level() {
            Some(level) => level >= self.min_record_sdk,
            None => {
                debug!("sdk level unknown, screen recording disabled");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::fake::ScriptedShell;
    use pretty_assertions::assert_eq;

    fn screen(shell: &Arc<ScriptedShell>, sdk: Option<u32>) -> ScreenOps {
        let executor = CommandExecutor::new(shell.clone());
        let device = Arc::new(DeviceProps::new(executor.clone(), sdk));
        ScreenOps::new(executor, device, &Config::default())
    }

    #[test]
    fn capture_appends_the_path() {
        let shell = Arc::new(ScriptedShell::new());
        let screen = screen(&shell, Some(30));
        assert!(screen.screen_cap("/sdcard/shot.png"));
        assert!(!screen.screen_cap(""));
        assert_eq!(shell.commands(), vec!["screencap -p /sdcard/shot.png"]);
    }

    #[test]
    fn record_uses_defaults() {
        let shell = Arc::new(ScriptedShell::new());
        assert!(screen(&shell, Some(19)).screen_record("/sdcard/a.mp4"));
        assert_eq!(
            shell.commands(),
            vec!["screenrecord --bit-rate 4000000 --time-limit 30 /sdcard/a.mp4"]
        );
    }

    #[test]
    fn record_below_kitkat_issues_nothing() {
        let shell = Arc::new(ScriptedShell::new());
        let screen = screen(&shell, Some(18));
        assert!(!screen.screen_record_with("/sdcard/a.mp4", 8_000_000, 10));
        assert!(shell.commands().is_empty());
    }

    #[test]
    fn record_with_custom_flags() {
        let shell = Arc::new(ScriptedShell::new());
        assert!(screen(&shell, Some(34)).screen_record_with("/sdcard/b.mp4", 8_000_000, 10));
        assert_eq!(
            shell.commands(),
            vec!["screenrecord --bit-rate 8000000 --time-limit 10 /sdcard/b.mp4"]
        );
    }
}
