//! Project Timer - track time against projects and their tasks
//!
//! The [`state::Tracker`] engine holds projects, their elements, and a single
//! stopwatch timer that runs against either a whole project or one element.
//! The binary hosts one tracker behind a local HTTP API and drives its tick
//! counter once per second.

pub mod config;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, Tracker};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
