//! Utility functions

pub mod progress_log;

pub use progress_log::{set_active_progress, ProgressAwareStderr};
