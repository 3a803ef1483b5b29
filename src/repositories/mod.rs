// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are data mappers plus the write semantics of each catalog
// - Row-level validation only, no orchestration
// - NO event emission
// - Explicit SQL only

pub mod station_repository;

pub use station_repository::{SqliteStationRepository, StationRepository};

#[cfg(test)]
pub use station_repository::MockStationRepository;
