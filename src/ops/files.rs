use crate::ops::mount::{MountMode, Mounts};
use crate::shell::CommandExecutor;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct FileOps {
    executor: CommandExecutor,
    mounts: Mounts,
}

impl FileOps {
    pub fn new(executor: CommandExecutor, mounts: Mounts) -> Self {
        Self { executor, mounts }
    }

    /// Copies `source` into the existing directory `destination_dir`, keeping the
    /// file name. The directory's filesystem is remounted read-write first.
    pub fn copy_file(&self, source: &str, destination_dir: &str) -> bool {
        if source.is_empty() || destination_dir.is_empty() {
            return false;
        }
        let source_path = Path::new(source);
        let dir = Path::new(destination_dir);
        if !source_path.exists() || !dir.is_dir() {
            debug!(source, destination_dir, "copy refused: missing source or directory");
            return false;
        }
        let Some(name) = source_path.file_name() else {
            return false;
        };
        let target = dir.join(name);
        self.copy_into(source, destination_dir, &target.to_string_lossy())
    }

    /// Copies `source` to the explicit file path `destination`, whose parent must be an
    /// existing directory.
    pub fn copy_file_to(&self, source: &str, destination: &str) -> bool {
        if source.is_empty() || destination.is_empty() {
            return false;
        }
        let parent = match Path::new(destination).parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => return false,
        };
        if !Path::new(source).exists() || !parent.is_dir() {
            debug!(source, destination, "copy refused: missing source or directory");
            return false;
        }
        self.copy_into(source, &parent.to_string_lossy(), destination)
    }

    fn copy_into(&self, source: &str, dir: &str, target: &str) -> bool {
        if !self.mounts.remount_as(dir, MountMode::ReadWrite) {
            warn!(dir, "remount before copy failed");
            return false;
        }
        let (Ok(source), Ok(target)) = (shlex::try_quote(source), shlex::try_quote(target)) else {
            warn!("copy paths cannot be quoted");
            return false;
        };
        self.executor
            .run_command(&format!("cat {} > {}", source, target))
            .succeeded()
    }
}
