use crate::core::Config;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// Looks for a su binary in a fixed, ordered list of directories.
///
/// A positive answer is sticky for the life of the detector. A negative one is
/// recomputed on every call, since a root manager may install su later.
pub struct RootDetector {
    su_dirs: Vec<PathBuf>,
    binary: String,
    rooted: AtomicBool,
}

impl RootDetector {
    pub fn new(su_dirs: Vec<PathBuf>, binary: impl Into<String>) -> Self {
        Self {
            su_dirs,
            binary: binary.into(),
            rooted: AtomicBool::new(false),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.su_binary_dirs.clone(), config.su_binary_name.clone())
    }

    pub fn has_rooted(&self) -> bool {
        if self.rooted.load(Ordering::Acquire) {
            return true;
        }
        self.locate_su().is_some()
    }

    /// First directory in search order that holds the su binary. Unreadable or
    /// missing directories count as "not found".
    pub fn locate_su(&self) -> Option<PathBuf> {
        let found = self
            .su_dirs
            .iter()
            .map(|dir| dir.join(&self.binary))
            .find(|candidate| candidate.exists());
        if let Some(path) = &found {
            if !self.rooted.swap(true, Ordering::AcqRel) {
                info!(path = %path.display(), "su binary found");
            }
        }
        found
    }

    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.su_dirs
    }
}
