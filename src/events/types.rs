// src/events/types.rs
//
// Notification payloads.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable and never persisted
// - Operation and toast events stay separate shapes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trait that every bus payload implements
pub trait AppEvent: std::fmt::Debug + Clone + Send + Sync + 'static {
    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

/// Completion or failure of a feature operation, for per-feature status panels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppOperationEvent {
    /// Feature that raised the event, e.g. "station"
    pub category: String,

    /// What was attempted, e.g. "refresh_radiru"
    pub action: String,

    pub succeeded: bool,

    /// User-facing text
    pub message: String,

    pub occurred_at_utc: DateTime<Utc>,
}

impl AppOperationEvent {
    pub fn new(
        category: impl Into<String>,
        action: impl Into<String>,
        succeeded: bool,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            action: action.into(),
            succeeded,
            message: message.into(),
            occurred_at_utc: Utc::now(),
        }
    }

    pub fn succeeded(
        category: impl Into<String>,
        action: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(category, action, true, message)
    }

    pub fn failed(
        category: impl Into<String>,
        action: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(category, action, false, message)
    }
}

impl AppEvent for AppOperationEvent {
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at_utc
    }

    fn event_type(&self) -> &'static str {
        "AppOperationEvent"
    }
}

/// Whole-screen transient notice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppToastEvent {
    pub message: String,
    pub is_success: bool,
    pub occurred_at_utc: DateTime<Utc>,
}

impl AppToastEvent {
    pub fn new(message: impl Into<String>, is_success: bool) -> Self {
        Self {
            message: message.into(),
            is_success,
            occurred_at_utc: Utc::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, true)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, false)
    }
}

impl AppEvent for AppToastEvent {
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at_utc
    }

    fn event_type(&self) -> &'static str {
        "AppToastEvent"
    }
}
