// src/lib.rs
// RadiKeep - station catalogs and operation notifications for a radio recorder
//
// Architecture:
// - Domain-centric: station identity and validation live in `domain`
// - Repositories own the write semantics of each catalog
// - Services orchestrate and report outcomes through the publisher traits
// - The event bus fans notifications out to host subscribers
// - Explicit: No implicit behavior, no magic

pub mod cancellation;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use domain::{
    CodeIdentified, DomainError, DomainResult, Enumeration, NhkRadiruStation, RadikoStation,
    RadiruAreaKind, RadiruStationEntry, RadiruStationKind,
};

pub use error::{AppError, AppResult};

pub use cancellation::{CancellationSignal, CancellationSource};

pub use events::{
    AppOperationEvent, AppOperationEventPublisher, AppToastEvent, AppToastEventPublisher, EventBus,
};
