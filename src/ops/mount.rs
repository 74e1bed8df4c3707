use crate::core::config::{COMMAND_MOUNTS, COMMAND_REMOUNT};
use crate::shell::CommandExecutor;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MountMode {
    ReadWrite,
    ReadOnly,
}

impl MountMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MountMode::ReadWrite => "rw",
            MountMode::ReadOnly => "ro",
        }
    }
}

impl fmt::Display for MountMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidMountMode(pub String);

impl fmt::Display for InvalidMountMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid mount mode {:?}, expected rw or ro", self.0)
    }
}

impl std::error::Error for InvalidMountMode {}

impl FromStr for MountMode {
    type Err = InvalidMountMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("rw") {
            Ok(MountMode::ReadWrite)
        } else if s.eq_ignore_ascii_case("ro") {
            Ok(MountMode::ReadOnly)
        } else {
            Err(InvalidMountMode(s.to_string()))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MountEntry {
    pub device: String,
    pub mount_point: String,
    pub fs_type: String,
    pub options: Vec<String>,
}

impl MountEntry {
    pub fn is_read_only(&self) -> bool {
        self.options.iter().any(|o| o == "ro")
    }
}

#[derive(Clone)]
pub struct Mounts {
    executor: CommandExecutor,
}

impl Mounts {
    pub fn new(executor: CommandExecutor) -> Self {
        Self { executor }
    }

    /// Remounts the filesystem holding `path`. Any mode other than `rw`/`ro` (in any
    /// case) is refused before a command is issued.
    pub fn remount(&self, path: &str, mode: &str) -> bool {
        if path.is_empty() {
            return false;
        }
        match mode.parse::<MountMode>() {
            Ok(mode) => self.remount_as(path, mode),
            Err(e) => {
                debug!(path, error = %e, "remount refused");
                false
            }
        }
    }

    pub fn remount_as(&self, path: &str, mode: MountMode) -> bool {
        let table = self.mount_table();
        let Some(entry) = find_mount(&table, path) else {
            warn!(path, "no mount point found");
            return false;
        };
        let command = format!(
            "{}{} {} {}",
            COMMAND_REMOUNT, mode, entry.device, entry.mount_point
        );
        self.executor.run_command(&command).succeeded()
    }

    pub fn mount_table(&self) -> Vec<MountEntry> {
        let result = self.executor.run_command(COMMAND_MOUNTS);
        if !result.succeeded() {
            warn!(reason = ?result.failure(), "could not read mount table");
            return Vec::new();
        }
        parse_mounts(result.message())
    }
}

fn parse_mounts(output: &str) -> Vec<MountEntry> {
    output
        .lines()
        .filter_map(|line| {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 4 {
                return None;
            }
            Some(MountEntry {
                device: unescape(parts[0]),
                mount_point: unescape(parts[1]),
                fs_type: parts[2].to_string(),
                options: parts[3].split(',').map(str::to_string).collect(),
            })
        })
        .collect()
}

fn unescape(field: &str) -> String {
    field
        .replace("\\040", " ")
        .replace("\\011", "\t")
        .replace("\\134", "\\")
}

/// Deepest mount point containing `path`, compared by whole path components. Later
/// entries win ties, as with stacked mounts.
fn find_mount<'a>(table: &'a [MountEntry], path: &str) -> Option<&'a MountEntry> {
    let path = Path::new(path);
    table
        .iter()
        .filter(|entry| path.starts_with(&entry.mount_point))
        .max_by_key(|entry| Path::new(&entry.mount_point).components().count())
}
