use crate::core::error::{Result, ShellError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

pub const SU_BINARY_DIRS: &[&str] = &[
    "/system/bin",
    "/system/sbin",
    "/system/xbin",
    "/vendor/bin",
    "/sbin",
    "/su/bin",
];
pub const SU_BINARY: &str = "su";
pub const COMMAND_ID: &str = "id";
pub const COMMAND_SCREENCAP: &str = "screencap -p ";
pub const COMMAND_SCREENRECORD: &str = "screenrecord ";
pub const COMMAND_PS: &str = "ps";
pub const COMMAND_PIDOF: &str = "pidof ";
pub const COMMAND_KILL: &str = "kill ";
pub const COMMAND_MOUNTS: &str = "cat /proc/mounts";
pub const COMMAND_REMOUNT: &str = "mount -o remount,";
pub const COMMAND_SDK_LEVEL: &str = "getprop ro.build.version.sdk";
pub const CONFIG_ENV: &str = "ROOTSHELL_CONFIG";

/// Console menu entries in display order. `Config::menu_labels` overrides single labels.
pub const DEFAULT_MENU_LABELS: &[(&str, &str)] = &[
    ("0", "Root detection report"),
    ("1", "Request root permission"),
    ("2", "Run a raw command"),
    ("3", "Check whether a process is running"),
    ("4", "Kill a process by name"),
    ("5", "Capture the screen"),
    ("6", "Remount a path"),
    ("7", "Show the mount table"),
    ("8", "Change file permissions"),
    ("9", "Record the screen"),
    ("10", "Copy a file"),
    ("11", "Restart the device"),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub su_binary_dirs: Vec<PathBuf>,
    pub su_binary_name: String,
    pub permission_ttl_ms: u64,
    pub command_timeout_ms: u64,
    pub screenrecord_bit_rate: u64,
    pub screenrecord_time_limit: u64,
    pub min_screenrecord_sdk: u32,
    /// Overrides the `ro.build.version.sdk` lookup when set.
    pub sdk_level: Option<u32>,
    pub journal_suffix: String,
    pub menu_labels: HashMap<String, String>,
}
impl Default for Config {
    fn default() -> Self {
        let labels = DEFAULT_MENU_LABELS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            su_binary_dirs: SU_BINARY_DIRS.iter().map(PathBuf::from).collect(),
            su_binary_name: SU_BINARY.to_string(),
            permission_ttl_ms: 10 * 60 * 1000,
            command_timeout_ms: 30 * 1000,
            screenrecord_bit_rate: 4_000_000,
            screenrecord_time_limit: 30,
            min_screenrecord_sdk: 19,
            sdk_level: None,
            journal_suffix: "-journal".to_string(),
            menu_labels: labels,
        }
    }
}
impl Config {
    /// Reads the JSON file named by `ROOTSHELL_CONFIG`, or falls back to the defaults.
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                let raw = std::fs::read_to_string(&path)?;
                Self::from_json(&raw)
            }
            None => Ok(Self::default()),
        }
    }
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }
    fn validate(&self) -> Result<()> {
        if self.permission_ttl_ms == 0 {
            return Err(ShellError::Config("permission_ttl_ms must be positive".to_string()));
        }
        if self.command_timeout_ms == 0 {
            return Err(ShellError::Config("command_timeout_ms must be positive".to_string()));
        }
        if self.su_binary_name.trim().is_empty() {
            return Err(ShellError::Config("su_binary_name is empty".to_string()));
        }
        Ok(())
    }
    pub fn permission_ttl(&self) -> Duration {
        Duration::from_millis(self.permission_ttl_ms)
    }
    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }
    pub fn get_label(&self, key: &str, fallback: &str) -> String {
        self.menu_labels
            .get(key)
            .cloned()
            .unwrap_or_else(|| fallback.to_string())
    }
}
