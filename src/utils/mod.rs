//! Utility modules for podctl

pub mod errors;
pub mod logger;
pub mod pretty;

// Re-export commonly used items
pub use errors::{PodctlError, display_error_and_exit, enhance_error};
pub use logger::{log_debug, log_error, log_info, log_warn};
pub use pretty::pretty_string;
