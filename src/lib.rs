//! Root detection, cached root permission and privileged shell commands for
//! Android devices.
//!
//! [`Roots`] ties the pieces together: a [`root::RootDetector`] that looks for the su
//! binary, a [`root::PermissionManager`] that caches the outcome of an `id` check for
//! a TTL, and a [`shell::CommandExecutor`] that turns a command string into a
//! [`shell::CommandResult`]. The operations in [`ops`] are built on the executor.
pub mod core;
pub mod ops;
pub mod root;
pub mod roots;
pub mod shell;
pub use crate::core::{Config, Result, ShellError};
pub use roots::Roots;
