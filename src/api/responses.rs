//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{TimerState, TrackerView};

/// Body of the create-project and create-element endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameRequest {
    pub name: String,
}

/// Response structure for intent endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub tracker: TrackerView,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, tracker: TrackerView) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            tracker,
        }
    }

    /// The intent changed the tracker
    pub fn applied(message: String, tracker: TrackerView) -> Self {
        Self::new("applied".to_string(), message, tracker)
    }

    /// The intent was a no-op
    pub fn ignored(message: String, tracker: TrackerView) -> Self {
        Self::new("ignored".to_string(), message, tracker)
    }

    pub fn is_applied(&self) -> bool {
        self.status == "applied"
    }
}

/// Full status: tracker snapshot plus server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub tracker: TrackerView,
    pub timer: TimerState,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
