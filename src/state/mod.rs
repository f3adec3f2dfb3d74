//! State management module
//!
//! The tracker engine, its value types, and the shared handle the server and
//! the tick task work through.

pub mod app_state;
pub mod error;
pub mod model;
pub mod timer_state;
pub mod tracker;
pub mod view;

// Re-export main types
pub use app_state::{AppState, IntentResult};
pub use error::StateError;
pub use model::{ActiveTimer, Element, ElementId, Project, ProjectId};
pub use timer_state::TimerState;
pub use tracker::{ElementDeletion, ProjectDeletion, TimerTransition, Tracker};
pub use view::{ElementView, ProjectView, TrackerView};
