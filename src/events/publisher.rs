// src/events/publisher.rs
//
// Publish-side contracts. Operations depend on these traits only, never on
// the bus or on any transport.

use async_trait::async_trait;

use crate::cancellation::CancellationSignal;
use crate::error::AppResult;
use crate::events::types::{AppOperationEvent, AppToastEvent};

/// Delivers operation-lifecycle events to per-feature status surfaces.
///
/// Completion means delivery was handed off, not that subscribers finished.
/// Subscriber failures never surface here. The only error is
/// `AppError::Cancelled` when `cancel` fires before hand-off completes.
#[async_trait]
pub trait AppOperationEventPublisher: Send + Sync {
    async fn publish_operation(
        &self,
        event: AppOperationEvent,
        cancel: &CancellationSignal,
    ) -> AppResult<()>;
}

/// Delivers whole-screen toast events. Same contract as operation events,
/// separate subscriber set.
#[async_trait]
pub trait AppToastEventPublisher: Send + Sync {
    async fn publish_toast(&self, event: AppToastEvent, cancel: &CancellationSignal)
        -> AppResult<()>;
}
