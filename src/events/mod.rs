// src/events/mod.rs
//
// Notification Bus - Public API
//
// Operations depend on the publisher traits; hosts own the EventBus and
// register subscribers on it.

pub mod bus;
pub mod publisher;
pub mod types;

pub use types::{AppEvent, AppOperationEvent, AppToastEvent};

pub use publisher::{AppOperationEventPublisher, AppToastEventPublisher};

pub use bus::{ChannelKind, EventBus, EventLogEntry, Subscription};

use crate::config::BusSettings;

/// Initialize a new event bus
pub fn create_event_bus(settings: BusSettings) -> EventBus {
    EventBus::with_settings(settings)
}
