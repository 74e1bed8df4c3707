pub mod detector;
pub mod permission;
pub use detector::RootDetector;
pub use permission::{Clock, PermissionManager, PermissionOutcome, SystemClock};
