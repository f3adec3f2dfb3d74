//! Utility functions module
//!
//! Shutdown signal handling and display formatting.

pub mod signals;
pub mod time_format;

pub use signals::shutdown_signal;
pub use time_format::format_hms;
