//! Runtime version management
//!
//! Discovery of installed Gradle distributions and switching of the active one.

pub mod common;
pub mod gradle;
pub mod locator;

pub use gradle::{GradleManager, Installation, LinkStep, SwitchOptions, SwitchOutcome};
pub use locator::{DirKind, Locator};
