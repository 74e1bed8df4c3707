pub mod device;
pub mod file_mode;
pub mod files;
pub mod mount;
pub mod process;
pub mod screen;
pub use device::DeviceProps;
pub use file_mode::{FileAccess, FileModes, JournalPairResult};
pub use files::FileOps;
pub use mount::{MountEntry, MountMode, Mounts};
pub use process::{ProcessInfo, ProcessManager};
pub use screen::ScreenOps;
