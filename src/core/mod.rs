//! Core module - errors, paths, platform detection and privileges

mod error;
pub mod paths;
pub mod platform;
pub mod privilege;

pub use error::{GvmError, Result, format_error_with_suggestion, format_top_level};
pub use platform::{Host, Layout, LayoutSource};
pub use privilege::is_privileged;
