// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod station_catalog_service;

pub use station_catalog_service::{RefreshSummary, StationCatalogService};
